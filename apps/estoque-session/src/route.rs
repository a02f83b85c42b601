//! # Routes
//!
//! Screens of the mobile app and the command module serving each.
//!
//! ```text
//!   /               Dashboard       commands::report
//!   /produtos       Products        commands::product
//!   /lotes          Batches         commands::batch
//!   /reposicao      Restock         commands::restock
//!   /movimentacoes  Movements       commands::movement
//!   /relatorios     Reports         commands::report
//!   anything else   NotFound
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Dashboard,
    Products,
    Batches,
    Restock,
    Movements,
    Reports,
    NotFound,
}

impl Route {
    /// Every navigable route, in menu order.
    pub const MENU: [Route; 6] = [
        Route::Dashboard,
        Route::Products,
        Route::Batches,
        Route::Restock,
        Route::Movements,
        Route::Reports,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Products => "/produtos",
            Route::Batches => "/lotes",
            Route::Restock => "/reposicao",
            Route::Movements => "/movimentacoes",
            Route::Reports => "/relatorios",
            Route::NotFound => "*",
        }
    }

    /// Resolves a path; trailing slashes and query strings are ignored.
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Route::MENU
            .into_iter()
            .find(|r| r.path() == normalized)
            .unwrap_or(Route::NotFound)
    }

    /// Menu label.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Products => "Produtos",
            Route::Batches => "Lotes",
            Route::Restock => "Reposição",
            Route::Movements => "Movimentações",
            Route::Reports => "Relatórios",
            Route::NotFound => "Página não encontrada",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_menu_paths() {
        for route in Route::MENU {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(Route::from_path("/configuracoes"), Route::NotFound);
        assert_eq!(Route::from_path("/produtos/1"), Route::NotFound);
        assert_eq!(Route::from_path("/reposicao/?tab=historico"), Route::Restock);
        assert_eq!(Route::from_path(""), Route::Dashboard);
    }
}
