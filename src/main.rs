pub mod args;

use anyhow::Context as _;
use pup_tool::pup::*;
use pup_tool::types::*;
use pup_tool::utils::counter::Counter;
use pup_tool::utils::files;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .with(
                EnvFilter::builder()
                    .with_default_directive(level.into())
                    .from_env_lossy(),
            ),
    )
    .context("Failed to set global tracing subscriber")
}

fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    Ok(read_pup_file(input)?)
}

/// Decodes the header and the entry table without touching payloads.
fn read_table(data: &[u8]) -> PupResult<(Header, Vec<EntryRecord>)> {
    let header = decode_header(data)?;
    validate_sizes(&header, data.len())?;
    let records = decode_entries(data, &header)?;
    Ok((header, records))
}

fn print_info(input: &str) -> anyhow::Result<()> {
    let data = read_input(input)?;
    let (header, _) = read_table(&data)?;
    println!("Magic: {:#x}", header.magic);
    println!("Version: {}", header.version);
    println!("Mode: {}", header.mode);
    println!(
        "Endianness: {:?} ({})",
        header.endianness_kind(),
        header.endianness
    );
    println!("Flags: {:#x}", header.flags);
    println!(
        "ContentType: {:?} ({:#x})",
        header.content_type_kind(),
        header.content_type
    );
    println!(
        "ProductType: {:?} ({:#x})",
        header.product_type_kind(),
        header.product_type
    );
    println!("HeaderSize: {}", header.header_size);
    println!("HashSize: {}", header.hash_size);
    println!("FileSize: {}", header.file_size);
    println!("EntryCount: {}", header.entries_count);
    println!("Flags2: {:#x}", header.flags2);
    Ok(())
}

fn list_entries(input: &str, output_type: OutputType) -> anyhow::Result<()> {
    let data = read_input(input)?;
    let (header, records) = read_table(&data)?;
    let entries: Vec<_> = records
        .iter()
        .enumerate()
        .map(|(index, record)| EntryInfo::new(index, record))
        .collect();
    match output_type {
        OutputType::Json => {
            let info = PupInfo {
                header: HeaderInfo::from(&header),
                entries,
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputType::Text => {
            for e in entries.iter() {
                println!(
                    "{:4} {:#06x} {:<24} flags={:#010x} offset={:#010x} size={:#x}/{:#x}{}{} {}",
                    e.index,
                    e.entry_id,
                    e.file_name,
                    e.record.flags,
                    e.record.offset,
                    e.record.file_size,
                    e.record.memory_size,
                    if e.compressed { " compressed" } else { "" },
                    if e.blocked { " blocked" } else { "" },
                    e.device_path
                );
            }
        }
    }
    Ok(())
}

fn extract_entries(
    input: &str,
    output: Option<&str>,
    config: &ExtractConfig,
    counter: &Counter,
) -> anyhow::Result<()> {
    let output = match output {
        Some(output) => PathBuf::from(output),
        None => files::default_output_dir(input),
    };
    let data = read_input(input)?;
    let mut payloads = Vec::new();
    if config.raw {
        let (_, records) = read_table(&data)?;
        for (index, record) in records.iter().enumerate() {
            let raw = read_payload(&data, index, record)?;
            payloads.push((EntryInfo::new(index, record), raw.to_vec()));
        }
    } else {
        let pup = Pup::parse(&data)?;
        for (index, entry) in pup.into_parts().1.into_iter().enumerate() {
            let info = EntryInfo::new(index, entry.record());
            payloads.push((info, entry.into_payload()));
        }
    }
    for (info, payload) in payloads {
        if !config.matches(info.file_name) {
            counter.inc_skipped();
            continue;
        }
        let path = output.join(info.output_name());
        match files::write_file(&path, &payload) {
            Ok(_) => {
                tracing::info!("Extracted {} ({} bytes)", path.display(), payload.len());
                counter.inc_ok();
            }
            Err(e) => {
                tracing::error!("Error writing {}: {}", path.display(), e);
                counter.inc_error();
            }
        }
    }
    Ok(())
}

fn report(re: anyhow::Result<()>, backtrace: bool) -> bool {
    match re {
        Ok(_) => true,
        Err(e) => {
            match e.downcast_ref::<PupError>() {
                Some(err) => eprintln!("Error ({:?}): {:#}", err.kind(), e),
                None => eprintln!("Error: {:#}", e),
            }
            if backtrace {
                eprintln!("Backtrace: {}", e.backtrace());
            }
            false
        }
    }
}

fn main() {
    let arg = args::parse_args();
    if arg.backtrace {
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }
    if let Err(e) = init_logging(arg.verbose) {
        eprintln!("{:#}", e);
    }
    let ok = match &arg.command {
        args::Command::Info { input } => report(print_info(input), arg.backtrace),
        args::Command::List { input, output_type } => {
            report(list_entries(input, *output_type), arg.backtrace)
        }
        args::Command::Extract {
            input,
            output,
            filter,
            raw,
        } => {
            let config = ExtractConfig {
                filter: filter.clone(),
                raw: *raw,
            };
            let counter = Counter::new();
            let re = extract_entries(input, output.as_deref(), &config, &counter);
            let ok = report(re, arg.backtrace);
            eprintln!("{}", counter);
            ok && !counter.has_error()
        }
    };
    if !ok {
        std::process::exit(1);
    }
}
