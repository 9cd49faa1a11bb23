pub static STRICT_HELP: &str = "Treat damaged embedded patterns as fatal

By default a pattern record that fails to parse is logged and the
pattern loop stops early, the style descriptors still decode. With
this flag the whole decode reports the failure instead";

pub static MAX_DEPTH_HELP: &str = "Maximum descriptor nesting depth

Style descriptors nest objects and lists recursively. Streams that
nest deeper than this limit are rejected instead of exhausting the
stack";

pub static EXTRACT_PATTERNS_HELP: &str = "Write embedded patterns as GIMP .pat files

Every pattern decoded from the stream is written into DIRECTORY under
its identifier, one file per pattern, in the GIMP pattern format";
