pub(crate) mod help_strings;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::cmd_args::help_strings::{EXTRACT_PATTERNS_HELP, MAX_DEPTH_HELP, STRICT_HELP};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("ochre")
        .about("Decode Adobe layer style (ASL) streams into an XML catalog")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("out")
            .help("Output file for the XML catalog, stdout when absent")
            .action(ArgAction::Append))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("DECODING")
            .help("Treat damaged embedded patterns as fatal")
            .long_help(STRICT_HELP))
        .arg(Arg::new("no-patterns")
            .long("no-patterns")
            .action(ArgAction::SetTrue)
            .help_heading("DECODING")
            .help("Skip the embedded pattern collection"))
        .arg(Arg::new("max-depth")
            .long("max-depth")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("256")
            .help("Maximum descriptor nesting depth")
            .long_help(MAX_DEPTH_HELP))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("16384")
            .help("Maximum embedded pattern width"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("DECODING")
            .value_parser(value_parser!(usize))
            .default_value("16384")
            .help("Maximum embedded pattern height"))
        .arg(Arg::new("extract-patterns")
            .long("extract-patterns")
            .help_heading("OUTPUT")
            .value_name("DIRECTORY")
            .help("Write every embedded pattern into DIRECTORY as a GIMP .pat file")
            .long_help(EXTRACT_PATTERNS_HELP))
        .arg(Arg::new("all-yes")
            .short('y')
            .long("all-yes")
            .action(ArgAction::SetTrue)
            .help("Answer yes to all overwrite prompts"))
}
