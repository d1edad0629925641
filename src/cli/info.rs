use std::io::Sink;

use anyhow::Result;
use indicatif::MultiProgress;
use log::info;

use i2s::process::decode::Decoder;

use crate::cli::command::{Cli, InfoArgs};
use crate::cli::decode::{decoder_options, run_capture};
use crate::cli::sink::CliSink;
use crate::timestamp::sample_time_str;

pub fn cmd_info(args: &InfoArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    let mut options = decoder_options(&args.capture, cli)?;
    options.dump_file = false;
    options.wav_preview = false;
    // channel counts come from the annotations
    options.show_log = true;

    let mut decoder: Decoder<Sink> = Decoder::new(options);
    if let Some(samplerate) = args.capture.samplerate {
        decoder.set_samplerate(samplerate);
    }

    info!("Analyzing {}", args.capture.input.display());

    let mut sink: CliSink<Sink, Sink, Sink> = CliSink::new(None, None, None);
    let (samples, words) = run_capture(&args.capture, &mut decoder, &mut sink, multi)?;
    decoder.finish()?;
    let counts = sink.finish()?;

    let samplerate = decoder.samplerate();
    let state = decoder.state();

    println!("Capture: {}", args.capture.input.display());
    match sample_time_str(samples, samplerate) {
        Some(duration) => println!("Samples: {samples} ({duration})"),
        None => println!("Samples: {samples}"),
    }
    println!("Channel map: {}", args.capture.channel_map);
    println!("Word length: {}-bit", decoder.options().word_length);
    println!("Words: {words} (left {}, right {})", counts.left, counts.right);
    println!("Length warnings: {}", counts.warnings);
    if let Some(first) = state.first_sample_index {
        println!("First word at sample: {first}");
    }
    if let Some(length) = state.last_word_length {
        println!("Last word length: {length} bits");
    }
    println!("{}", decoder.report());

    Ok(())
}
