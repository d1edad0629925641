use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::timestamp::sample_time_str;

/// Samples between progress bar refreshes.
pub const PROGRESS_INTERVAL: u64 = 64 * 1024;

pub fn create_progress_bar(multi: &MultiProgress, total_samples: Option<u64>) -> Result<ProgressBar> {
    let pb = if let Some(total) = total_samples {
        let pb = multi.add(ProgressBar::new(total));
        pb.set_style(ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} samples ({percent}%)\n{msg} | elapsed: {elapsed_precise} | ETA: {eta_precise}",
        )?);

        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    } else {
        let pb = multi.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} {pos} samples\n{msg} | elapsed: {elapsed_precise}",
        )?);

        pb
    };
    pb.set_message("waiting for first word");
    Ok(pb)
}

pub fn update_progress(
    pb: &ProgressBar,
    samples_read: u64,
    sample_index: u64,
    words: u64,
    samplerate: Option<u64>,
) {
    pb.set_position(samples_read);
    match sample_time_str(sample_index, samplerate) {
        Some(time) => pb.set_message(format!("words: {words} | capture time: {time}")),
        None => pb.set_message(format!("words: {words}")),
    }
}

pub fn finish_progress_bar(pb: &ProgressBar, words: u64, failed: bool) {
    if failed {
        pb.finish_with_message("decode failed");
    } else {
        pb.finish_with_message(format!("words: {words} | done"));
    }
}
