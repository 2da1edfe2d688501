//! Session commands for selecting, compressing and saving images.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use crate::core::{AddFilesOutcome, FileCandidate, OutputImage, Rejection, Session};
use crate::settings::SettingsProvider;
use crate::utils::{CompressorResult, RejectionReason, extract_filename, read_candidate, write_output};

/// Delay between consecutive saves in [`save_all`], per item.
pub const DEFAULT_SAVE_STAGGER: Duration = Duration::from_millis(500);

/// Reads every path and adds the readable ones to the session's selection.
///
/// Unreadable paths come back as rejections alongside the type and size
/// rejections from the selection filter, all in input order.
pub async fn select_paths<S, P>(session: &mut Session<S>, paths: &[P]) -> AddFilesOutcome
where
    S: SettingsProvider,
    P: AsRef<Path>,
{
    let mut outcome = AddFilesOutcome::default();

    for path in paths {
        let path = path.as_ref();
        match read_candidate(path).await {
            Ok(candidate) => {
                let added = session.add_files([candidate]);
                outcome.accepted.extend(added.accepted);
                outcome.rejected.extend(added.rejected);
                outcome.duplicates += added.duplicates;
            }
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                let name = extract_filename(&path.to_string_lossy()).to_string();
                outcome.rejected.push(Rejection {
                    candidate: FileCandidate::new(name, "", Vec::<u8>::new()),
                    reason: RejectionReason::Unreadable { message: e.to_string() },
                });
            }
        }
    }

    debug!("Selected {} of {} paths", outcome.accepted.len(), paths.len());
    outcome
}

/// Writes one output as `compressed_<name>` in `dir`.
pub async fn save_output(output: &OutputImage, dir: impl AsRef<Path>) -> CompressorResult<PathBuf> {
    let path = write_output(output, dir).await?;
    debug!("Saved {} ({} bytes)", path.display(), output.compressed_size_bytes);
    Ok(path)
}

/// Saves every output in order, waiting `stagger` between consecutive saves.
///
/// Failed saves are returned in place rather than stopping the rest.
pub async fn save_all(
    outputs: &[&OutputImage],
    dir: impl AsRef<Path>,
    stagger: Duration,
) -> Vec<CompressorResult<PathBuf>> {
    let dir = dir.as_ref();
    let mut saved = Vec::with_capacity(outputs.len());

    for (index, output) in outputs.iter().enumerate() {
        if index > 0 && !stagger.is_zero() {
            tokio::time::sleep(stagger).await;
        }
        let result = save_output(output, dir).await;
        if let Err(e) = &result {
            warn!("Saving {} failed: {}", output.suggested_filename(), e);
        }
        saved.push(result);
    }
    saved
}
