use std::ffi::CString;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::warn;
use thiserror::Error;

/// Terminal state of a share sheet presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The user completed a share action.
    Completed,
    /// The user dismissed the sheet without sharing. Not an error.
    Dismissed,
}

impl ShareOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareOutcome::Completed => "completed",
            ShareOutcome::Dismissed => "dismissed",
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum ShareError {
    #[error("No share handler registered")]
    HandlerMissing,
    #[error("Invalid share request: {0}")]
    InvalidRequest(String),
    #[error("Share handler failed with status {0}")]
    Failed(i32),
    #[error("Share error: {0}")]
    Internal(String),
}

/// Host callback reporting whether the platform can present a share sheet.
/// Returns nonzero when available.
pub type ShareAvailabilityFn = extern "C" fn() -> i32;

/// Host callback presenting the share sheet for a file.
///
/// Receives (path, mime type, uniform type identifier, dialog title). Blocks
/// until the user finishes and returns 0 for a completed share, 1 for a
/// dismissal, and a negative value on failure.
pub type SharePresentFn =
    extern "C" fn(*const c_char, *const c_char, *const c_char, *const c_char) -> i32;

#[derive(Clone, Copy)]
struct ShareHandlers {
    is_available: ShareAvailabilityFn,
    present: SharePresentFn,
}

lazy_static! {
    static ref SHARE_HANDLERS: Mutex<Option<ShareHandlers>> = Mutex::new(None);
}

/// Installs the host callbacks backing `CallbackShareService`. May be called
/// before or after library initialization; the latest registration wins.
pub fn register_handlers(
    is_available: ShareAvailabilityFn,
    present: SharePresentFn,
) -> Result<(), ShareError> {
    let mut guard = SHARE_HANDLERS
        .lock()
        .map_err(|_| ShareError::Internal("Share handler registry lock poisoned".to_string()))?;
    *guard = Some(ShareHandlers {
        is_available,
        present,
    });
    Ok(())
}

/// Removes any registered host callbacks; sharing reports unavailable after.
pub fn unregister_handlers() -> Result<(), ShareError> {
    let mut guard = SHARE_HANDLERS
        .lock()
        .map_err(|_| ShareError::Internal("Share handler registry lock poisoned".to_string()))?;
    *guard = None;
    Ok(())
}

fn current_handlers() -> Result<Option<ShareHandlers>, ShareError> {
    SHARE_HANDLERS
        .lock()
        .map(|guard| *guard)
        .map_err(|_| ShareError::Internal("Share handler registry lock poisoned".to_string()))
}

/// Hands a finished export file to the platform share mechanism.
#[async_trait]
pub trait ShareService: Send + Sync {
    /// Whether the host can present a share sheet right now.
    async fn is_available(&self) -> bool;

    /// Presents the share sheet for `path` and waits for the user to finish.
    async fn share_file(
        &self,
        path: &Path,
        mime_type: &str,
        uti: &str,
        dialog_title: &str,
    ) -> Result<ShareOutcome, ShareError>;
}

/// Share service backed by the host-registered callbacks.
pub struct CallbackShareService;

#[async_trait]
impl ShareService for CallbackShareService {
    async fn is_available(&self) -> bool {
        match current_handlers() {
            Ok(Some(handlers)) => (handlers.is_available)() != 0,
            Ok(None) => false,
            Err(e) => {
                warn!("Share availability check failed: {}", e);
                false
            }
        }
    }

    async fn share_file(
        &self,
        path: &Path,
        mime_type: &str,
        uti: &str,
        dialog_title: &str,
    ) -> Result<ShareOutcome, ShareError> {
        let handlers = current_handlers()?.ok_or(ShareError::HandlerMissing)?;

        let path = CString::new(path.to_string_lossy().into_owned())
            .map_err(|_| ShareError::InvalidRequest("path contains a NUL byte".to_string()))?;
        let mime = CString::new(mime_type)
            .map_err(|_| ShareError::InvalidRequest("mime type contains a NUL byte".to_string()))?;
        let uti = CString::new(uti)
            .map_err(|_| ShareError::InvalidRequest("uti contains a NUL byte".to_string()))?;
        let title = CString::new(dialog_title)
            .map_err(|_| ShareError::InvalidRequest("title contains a NUL byte".to_string()))?;

        // The host blocks this call while its share UI is on screen
        let status = tokio::task::spawn_blocking(move || {
            (handlers.present)(path.as_ptr(), mime.as_ptr(), uti.as_ptr(), title.as_ptr())
        })
        .await
        .map_err(|e| ShareError::Internal(format!("Share task failed: {}", e)))?;

        match status {
            0 => Ok(ShareOutcome::Completed),
            1 => Ok(ShareOutcome::Dismissed),
            code => Err(ShareError::Failed(code)),
        }
    }
}

/// Scriptable share service for tests and local tooling.
pub struct StubShareService {
    available: bool,
    outcome: Result<ShareOutcome, ShareError>,
    shared: Mutex<Vec<PathBuf>>,
}

impl StubShareService {
    pub fn new(available: bool, outcome: Result<ShareOutcome, ShareError>) -> Self {
        Self {
            available,
            outcome,
            shared: Mutex::new(Vec::new()),
        }
    }

    /// Available and every share completes.
    pub fn completing() -> Self {
        Self::new(true, Ok(ShareOutcome::Completed))
    }

    /// Reports the share capability as unavailable.
    pub fn unavailable() -> Self {
        Self::new(false, Err(ShareError::HandlerMissing))
    }

    /// Available, but the user dismisses every share sheet.
    pub fn dismissing() -> Self {
        Self::new(true, Ok(ShareOutcome::Dismissed))
    }

    /// Available, but every share fails with the given host status.
    pub fn failing(status: i32) -> Self {
        Self::new(true, Err(ShareError::Failed(status)))
    }

    /// Paths handed to `share_file` so far.
    pub fn shared_paths(&self) -> Vec<PathBuf> {
        self.shared.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ShareService for StubShareService {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn share_file(
        &self,
        path: &Path,
        _mime_type: &str,
        _uti: &str,
        _dialog_title: &str,
    ) -> Result<ShareOutcome, ShareError> {
        if let Ok(mut shared) = self.shared.lock() {
            shared.push(path.to_path_buf());
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn available() -> i32 {
        1
    }

    extern "C" fn present_completed(
        _path: *const c_char,
        _mime: *const c_char,
        _uti: *const c_char,
        _title: *const c_char,
    ) -> i32 {
        0
    }

    extern "C" fn present_dismissed(
        _path: *const c_char,
        _mime: *const c_char,
        _uti: *const c_char,
        _title: *const c_char,
    ) -> i32 {
        1
    }

    // The registry is process-global, so one test walks the whole lifecycle.
    #[tokio::test]
    async fn test_callback_service_lifecycle() {
        let service = CallbackShareService;

        unregister_handlers().unwrap();
        assert!(!service.is_available().await);
        let result = service
            .share_file(Path::new("/tmp/a.xlsx"), "mime", "uti", "title")
            .await;
        assert!(matches!(result, Err(ShareError::HandlerMissing)));

        register_handlers(available, present_completed).unwrap();
        assert!(service.is_available().await);
        let outcome = service
            .share_file(Path::new("/tmp/a.xlsx"), "mime", "uti", "title")
            .await
            .unwrap();
        assert_eq!(outcome, ShareOutcome::Completed);

        register_handlers(available, present_dismissed).unwrap();
        let outcome = service
            .share_file(Path::new("/tmp/a.xlsx"), "mime", "uti", "title")
            .await
            .unwrap();
        assert_eq!(outcome, ShareOutcome::Dismissed);

        unregister_handlers().unwrap();
        assert!(!service.is_available().await);
    }

    #[tokio::test]
    async fn test_stub_records_shared_paths() {
        let stub = StubShareService::completing();
        assert!(stub.is_available().await);

        stub.share_file(Path::new("/tmp/r.xlsx"), "mime", "uti", "title")
            .await
            .unwrap();
        assert_eq!(stub.shared_paths(), vec![PathBuf::from("/tmp/r.xlsx")]);
    }
}
