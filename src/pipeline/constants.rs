/// Raw reads as written by the downloader
pub const RAW_READ_SUFFIX: &str = ".fastq";

/// Reads written by the trimmer
pub const TRIMMED_READ_SUFFIX: &str = ".fastq.gz";

/// Per-sample quantifier output directory is `<id>_exp`
pub const OUTPUT_DIR_SUFFIX: &str = "_exp";

/// Separates the sample id from the rest of a file or directory name
pub const SAMPLE_ID_SEPARATOR: char = '_';

/// Quantifier metadata, relative to the output directory
pub const META_INFO_PATH: [&str; 2] = ["aux_info", "meta_info.json"];

/// Scratch directories left behind by a crashed download
pub const DOWNLOAD_TMP_PREFIX: &str = "fasterq.tmp.";

/// Inside the quant image
pub const CONVERT_SCRIPT: &str = "/workspace/quant2tsv.R";

/// Mount point of the root directory inside docker-like containers
pub const CONTAINER_VOLUME: &str = "/local_volume";
