use crate::model::{VehicleModel, import_model};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Import the model at `path` on a background thread.
///
/// The returned receiver yields the model once on success. On failure the
/// error is logged and the sender is dropped, so the receiver never yields.
pub fn spawn_load(path: impl Into<PathBuf>) -> mpsc::Receiver<VehicleModel> {
    let path = path.into();
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("model-loader".into())
        .spawn(move || match import_model(&path) {
            Ok(model) => {
                tracing::info!(path = %path.display(), name = %model.name, "vehicle model loaded");
                // The receiver may already be gone if the app shut down.
                let _ = tx.send(model);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "failed to load vehicle model: {e}");
            }
        });

    if let Err(e) = spawned {
        tracing::error!("could not start model loader: {e}");
    }
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{CAR_JSON, glb};
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn delivers_model_once() {
        let mut file = tempfile::Builder::new().suffix(".glb").tempfile().unwrap();
        file.write_all(&glb(CAR_JSON, None)).unwrap();

        let rx = spawn_load(file.path());
        let model = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(model.name, "Sedan");
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_err());
    }

    #[test]
    fn missing_file_never_delivers() {
        let rx = spawn_load("/nonexistent/car.glb");
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(10)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
