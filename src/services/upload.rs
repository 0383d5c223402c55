//! HTTP transfer service for file uploads.
//!
//! One [`send_file`] call is one transfer: a multipart POST of a single
//! file to the upload endpoint. Transfers go through `XmlHttpRequest`
//! rather than fetch because the coordinator needs upload progress
//! events, which the fetch API does not expose.

use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::types::{AppError, AppResult};

/// Join the configured base URL with the upload route.
pub fn upload_url(base: &str) -> String {
    format!("{}/upload", base.trim_end_matches('/'))
}

/// Upload one file as multipart form data to `{base_url}/upload`.
///
/// `on_progress(loaded, total)` fires for every progress event with a
/// computable length. The future resolves when the transfer settles:
/// `Ok(())` on load, `Err` on a transport error. The response body is
/// opaque and never parsed. There is no way to cancel a transfer once
/// it is in flight.
pub async fn send_file(
    file: &File,
    base_url: &str,
    mut on_progress: impl FnMut(f64, f64) + 'static,
) -> AppResult<()> {
    let xhr = XmlHttpRequest::new()
        .map_err(|e| AppError::Upload(format!("failed to create request: {:?}", e)))?;
    xhr.open("POST", &upload_url(base_url))
        .map_err(|e| AppError::Upload(format!("failed to open request: {:?}", e)))?;

    let upload = xhr
        .upload()
        .map_err(|e| AppError::Upload(format!("upload target unavailable: {:?}", e)))?;

    let form = FormData::new()
        .map_err(|e| AppError::Upload(format!("failed to create form data: {:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| AppError::Upload(format!("failed to append file: {:?}", e)))?;

    // Settled exactly once, by whichever of load/error fires first.
    let (settled_tx, settled_rx) = oneshot::channel::<Result<(), ()>>();
    let settled_tx = Rc::new(RefCell::new(Some(settled_tx)));

    let progress_cb = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
        if ev.length_computable() {
            on_progress(ev.loaded(), ev.total());
        }
    });
    upload.set_onprogress(Some(progress_cb.as_ref().unchecked_ref()));

    let tx = Rc::clone(&settled_tx);
    let load_cb = Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });
    upload.set_onload(Some(load_cb.as_ref().unchecked_ref()));

    let tx = Rc::clone(&settled_tx);
    let error_cb = Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(Err(()));
        }
    });
    upload.set_onerror(Some(error_cb.as_ref().unchecked_ref()));

    let sent = xhr
        .send_with_opt_form_data(Some(&form))
        .map_err(|e| AppError::Network(format!("failed to send request: {:?}", e)));

    // The listener closures must outlive the transfer; they are dropped
    // only after the await below resolves.
    let outcome = match sent {
        Ok(()) => match settled_rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(())) => Err(AppError::Network(format!(
                "transfer failed for {}",
                file.name()
            ))),
            Err(_) => Err(AppError::Upload(
                "transfer dropped before settling".to_string(),
            )),
        },
        Err(e) => Err(e),
    };

    // Detach the handlers before their closures go away; a stray event
    // after settling must be ignored, not dispatched to a dropped closure.
    upload.set_onprogress(None);
    upload.set_onload(None);
    upload.set_onerror(None);

    outcome
}
