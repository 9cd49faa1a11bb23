use clap::ArgMatches;
use ochre_core::options::DecoderOptions;

pub mod global_options;

pub fn get_decoder_options(options: &ArgMatches) -> DecoderOptions {
    let max_width = *options.get_one::<usize>("max-width").unwrap();
    let max_height = *options.get_one::<usize>("max-height").unwrap();
    let max_depth = *options.get_one::<usize>("max-depth").unwrap();
    let strict_mode = *options.get_one::<bool>("strict").unwrap();
    let decode_patterns = !*options.get_one::<bool>("no-patterns").unwrap();

    DecoderOptions::new_cmd()
        .set_max_height(max_height)
        .set_max_width(max_width)
        .set_max_depth(max_depth)
        .set_strict_mode(strict_mode)
        .set_decode_patterns(decode_patterns)
}
