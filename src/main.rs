use lcf_transcode::{
    codepage_to_encoding, detect_encoding, get_encoding, get_locale_encoding, recode,
    recode_to_unicode,
};
use std::env;
use std::fs;
use std::io::Write;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <file> [--ini <RPG_RT.ini>] [--codepage <number>] [--to <encoding>] [--out <path>]",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut ini_path: Option<&String> = None;
    let mut codepage: Option<u32> = None;
    let mut dst: Option<&String> = None;
    let mut out_path: Option<&String> = None;

    // Parse optional flags, each taking one value
    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        match (flag, args.get(i + 1)) {
            ("--ini", Some(v)) => ini_path = Some(v),
            ("--codepage", Some(v)) => match v.parse::<u32>() {
                Ok(n) => codepage = Some(n),
                Err(_) => {
                    eprintln!("ERROR: Invalid codepage number: {}", v);
                    std::process::exit(1);
                }
            },
            ("--to", Some(v)) => dst = Some(v),
            ("--out", Some(v)) => out_path = Some(v),
            ("--ini" | "--codepage" | "--to" | "--out", None) => {
                eprintln!("ERROR: {} requires an argument.", flag);
                std::process::exit(1);
            }
            _ => {
                eprintln!("ERROR: Unknown flag: {}", flag);
                std::process::exit(1);
            }
        }
        i += 2;
    }

    let text = match fs::read(input_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    eprintln!("Read {} bytes from {}", text.len(), input_path);

    // Resolve the source encoding, strongest hint first: the project config,
    // then an explicit codepage, then content detection, then the locale
    // default. The library fixes no order; this tool picks one.
    let mut source = String::new();
    if let Some(path) = ini_path {
        source = get_encoding(path);
        if !source.is_empty() {
            eprintln!("Source encoding from {}: {}", path, source);
        }
    }
    if source.is_empty() {
        if let Some(cp) = codepage {
            source = codepage_to_encoding(cp);
            if !source.is_empty() {
                eprintln!("Source encoding from codepage {}: {}", cp, source);
            }
        }
    }
    if source.is_empty() {
        source = detect_encoding(&text);
        if !source.is_empty() {
            eprintln!("Source encoding detected from content: {}", source);
        }
    }
    if source.is_empty() {
        source = get_locale_encoding();
        if !source.is_empty() {
            eprintln!("Source encoding from locale: {}", source);
        }
    }
    if source.is_empty() {
        eprintln!("No source encoding resolved; passing bytes through unchanged.");
    }

    let recoded = match dst {
        Some(name) => recode(&text, &source, name),
        None => recode_to_unicode(&text, &source),
    };

    match recoded {
        Ok(bytes) => {
            let written = match out_path {
                Some(path) => fs::write(path, &bytes).map(|_| path.as_str()),
                None => std::io::stdout().write_all(&bytes).map(|_| "<stdout>"),
            };
            match written {
                Ok(target) => eprintln!("Wrote {} bytes to {}", bytes.len(), target),
                Err(e) => {
                    eprintln!("ERROR: Failed to write output: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("ERROR: Failed to recode {}", input_path);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
