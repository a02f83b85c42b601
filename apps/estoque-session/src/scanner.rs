//! # Barcode Scanner
//!
//! Seam over the device camera scanner.
//!
//! ## Scan Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  raise_overlay()  ── app goes transparent, camera preview visible       │
//! │        │                                                                │
//! │  start_scan().await                                                     │
//! │        │                                                                │
//! │  lower_overlay()  ── ALWAYS, whatever start_scan returned               │
//! │        │                                                                │
//! │        ├── Content(code)     → pre-fill barcode field                   │
//! │        ├── NoContent         → nothing read, draft untouched            │
//! │        ├── PermissionDenied  → "Permissão negada"                       │
//! │        └── Failed(reason)    → "Erro no scanner"                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

/// What a scan attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResponse {
    /// Raw scanned text. Not validated as EAN/UPC.
    Content(String),
    /// The user closed the scanner without reading anything.
    NoContent,
    /// Camera permission was refused.
    PermissionDenied,
    Failed(String),
}

pub trait BarcodeScanner: Send + Sync {
    /// Checks camera permission and runs one scan.
    fn start_scan(&self) -> impl Future<Output = ScanResponse> + Send;

    /// Hides the app so the camera preview shows through.
    fn raise_overlay(&self) {}

    /// Restores the app view.
    fn lower_overlay(&self) {}
}

/// RAII guard that lowers the overlay when dropped, so an early return or a
/// cancelled scan future cannot leave the app hidden.
pub(crate) struct OverlayGuard<'a, S: BarcodeScanner> {
    scanner: &'a S,
}

impl<'a, S: BarcodeScanner> OverlayGuard<'a, S> {
    pub(crate) fn raise(scanner: &'a S) -> Self {
        scanner.raise_overlay();
        OverlayGuard { scanner }
    }
}

impl<S: BarcodeScanner> Drop for OverlayGuard<'_, S> {
    fn drop(&mut self) {
        self.scanner.lower_overlay();
    }
}
