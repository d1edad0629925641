use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::MultiProgress;
use log::{info, warn};

use i2s::process::decode::Decoder;
use i2s::structs::options::{DecoderOptions, SampleRatePolicy};

use crate::capture::CaptureReader;
use crate::cli::command::{CaptureArgs, Cli, DecodeArgs};
use crate::cli::progress::{
    PROGRESS_INTERVAL, create_progress_bar, finish_progress_bar, update_progress,
};
use crate::cli::sink::CliSink;
use crate::records::RecordWriter;

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Builds decoder options from `-O key=value` pairs and global flags.
pub fn decoder_options(capture: &CaptureArgs, cli: &Cli) -> Result<DecoderOptions> {
    let mut options = DecoderOptions::default();
    for pair in &capture.options {
        options
            .set_pair(pair)
            .with_context(|| format!("Invalid decoder option {pair:?}"))?;
    }
    if cli.strict {
        options.samplerate_policy = SampleRatePolicy::Required;
    }
    Ok(options)
}

/// Feeds the whole capture through `decoder`.
///
/// Returns the number of samples read and words published.
pub fn run_capture<W, R, V, O>(
    capture: &CaptureArgs,
    decoder: &mut Decoder<W>,
    sink: &mut CliSink<R, V, O>,
    multi: Option<&MultiProgress>,
) -> Result<(u64, u64)>
where
    W: Write,
    R: Write,
    V: Write,
    O: Write,
{
    let mut reader = CaptureReader::new(&capture.input, capture.channel_map, capture.sample_offset)
        .with_context(|| format!("Failed to open capture {}", capture.input.display()))?;
    let total = if reader.is_pipe() {
        None
    } else {
        reader.sample_count()
    };

    let pb = multi.map(|m| create_progress_bar(m, total)).transpose()?;
    let samplerate = decoder.samplerate();
    let start_time = Instant::now();
    let mut words = 0u64;
    let mut samples_read = 0u64;

    let result = reader.for_each_sample(READ_CHUNK_SIZE, |index, sample| {
        if decoder.decode_sample(index, sample, sink)? {
            words += 1;
        }
        sink.check()?;

        samples_read += 1;
        if samples_read % PROGRESS_INTERVAL == 0 {
            if let Some(pb) = &pb {
                update_progress(pb, samples_read, index, words, samplerate);
            }
        }
        Ok(true)
    });

    if let Some(pb) = &pb {
        finish_progress_bar(pb, words, result.is_err());
    }
    let samples = result?;

    info!(
        "Processed {} samples, {} words in {:.3}s",
        samples,
        words,
        start_time.elapsed().as_secs_f64()
    );
    Ok((samples, words))
}

/// Requested outputs that the decoder options leave empty.
fn ignored_outputs(args: &DecodeArgs, options: &DecoderOptions) -> Vec<&'static str> {
    let mut messages = Vec::new();
    if args.output_path.is_some() && !options.dump_file {
        messages.push("--output-path given without dump_file=yes; no PCM files will be written");
    }
    if args.records.is_some() && !options.show_log {
        messages.push("--records given with show_log=no; the records file will be empty");
    }
    messages
}

pub fn cmd_decode(args: &DecodeArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    let mut options = decoder_options(&args.capture, cli)?;
    if args.wav.is_some() {
        options.wav_preview = true;
    }

    info!(
        "Decoding {} ({}-bit words, channel map {}, dump: {}, strict mode: {})",
        args.capture.input.display(),
        options.word_length,
        args.capture.channel_map,
        options.dump_file,
        cli.strict
    );

    for message in ignored_outputs(args, &options) {
        warn!("{message}");
    }

    let output_dir = args.output_path.clone().unwrap_or_else(|| PathBuf::from("."));
    if options.dump_file {
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
    }

    let mut decoder = Decoder::create(options, &output_dir)?;
    if let Some(samplerate) = args.capture.samplerate {
        decoder.set_samplerate(samplerate);
    }

    let records = args
        .records
        .as_ref()
        .map(|path| {
            File::create(path)
                .with_context(|| format!("Failed to create records file {}", path.display()))
                .map(|file| RecordWriter::new(BufWriter::new(file)))
        })
        .transpose()?;
    let wav = args
        .wav
        .as_ref()
        .map(|path| {
            File::create(path)
                .with_context(|| format!("Failed to create WAV file {}", path.display()))
                .map(BufWriter::new)
        })
        .transpose()?;
    let out = (!args.quiet).then(|| BufWriter::new(std::io::stdout().lock()));

    let mut sink = CliSink::new(out, records, wav);
    run_capture(&args.capture, &mut decoder, &mut sink, multi)?;
    decoder.finish()?;
    let counts = sink.finish()?;

    if let Some(path) = &args.records {
        info!("Wrote {} DATA records to {}", counts.records, path.display());
    }
    if let Some(path) = &args.wav {
        info!("Wrote {} WAV preview bytes to {}", counts.wav_bytes, path.display());
    }
    println!("{}", decoder.report());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::Commands;
    use clap::Parser as ClapParser;

    fn parse(args: &[&str]) -> (Cli, DecoderOptions) {
        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Decode(decode) = &cli.command else {
            panic!("expected decode");
        };
        let options = decoder_options(&decode.capture, &cli).unwrap();
        (cli, options)
    }

    fn decode_args(cli: &Cli) -> &DecodeArgs {
        match &cli.command {
            Commands::Decode(args) => args,
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn records_without_show_log_warns() {
        let (cli, options) = parse(&[
            "i2sdump", "decode", "capture.bin", "-O", "show_log=no", "--records", "out.yaml",
        ]);
        assert_eq!(
            ignored_outputs(decode_args(&cli), &options),
            ["--records given with show_log=no; the records file will be empty"]
        );
    }

    #[test]
    fn output_path_without_dump_warns() {
        let (cli, options) = parse(&["i2sdump", "decode", "capture.bin", "--output-path", "out"]);
        assert_eq!(ignored_outputs(decode_args(&cli), &options).len(), 1);

        let (cli, options) = parse(&[
            "i2sdump", "decode", "capture.bin", "-O", "dump_file=yes", "--output-path", "out",
            "--records", "out.yaml",
        ]);
        assert!(ignored_outputs(decode_args(&cli), &options).is_empty());
    }

    #[test]
    fn strict_selects_required_samplerate() {
        let (_, options) = parse(&["i2sdump", "--strict", "decode", "capture.bin"]);
        assert_eq!(options.samplerate_policy, SampleRatePolicy::Required);
    }
}
