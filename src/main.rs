pub mod args;
pub mod types;
pub mod utils;

use std::io::Write;

fn get_encoding(arg: &args::Arg, data: &[u8]) -> types::Encoding {
    match &arg.encoding {
        Some(enc) => match enc {
            &types::TextEncoding::Auto => utils::encoding::detect(data),
            &types::TextEncoding::Euc => types::Encoding::EucJp,
            &types::TextEncoding::Sjis => types::Encoding::ShiftJis,
            &types::TextEncoding::Jis => types::Encoding::Jis,
        },
        None => utils::encoding::detect(data),
    }
}

pub fn truncate_file(
    input: &str,
    output: &Option<String>,
    length: usize,
    arg: &args::Arg,
) -> anyhow::Result<()> {
    let data = utils::files::read_file(input)?;
    let encoding = get_encoding(arg, &data);
    if !encoding.is_japanese() {
        eprintln!(
            "Warning: {} is not Japanese encoded text ({}), cutting at the byte offset",
            input,
            encoding.as_ref()
        );
    }
    let result = utils::str::jtruncate_as(&data, length, encoding);
    let out = output.as_deref().unwrap_or("-");
    let mut f = utils::files::write_file(out)?;
    f.write_all(&result)?;
    Ok(())
}

pub fn detect_file(input: &str) -> anyhow::Result<()> {
    let data = utils::files::read_file(input)?;
    println!("{}", utils::encoding::detect(&data).as_ref());
    Ok(())
}

fn main() {
    let arg = args::parse_args();
    if arg.backtrace {
        unsafe { std::env::set_var("RUST_LIB_BACKTRACE", "1") };
    }
    let re = match &arg.command {
        args::Command::Truncate {
            length,
            input,
            output,
        } => truncate_file(input, output, *length, &arg),
        args::Command::Detect { input } => detect_file(input),
    };
    match re {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            if arg.backtrace {
                eprintln!("Backtrace: {}", e.backtrace());
            }
            std::process::exit(1);
        }
    }
}
