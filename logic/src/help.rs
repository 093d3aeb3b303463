use crate::adapter::Adapter;
use crate::configuration::CONFIGURATION_FILE_NAME;
use crate::version::get_version;

pub fn print_help(adapter: &dyn Adapter) {
    adapter.print(&format!(
        "🐉  chimera ({}) - Hide a ZIP archive inside an image or video",
        get_version()
    ));
    let help_text = format!(
        r#"
USAGE:
    chimera <ORIGINAL> --file <PATH> [--output <PATH>]
    chimera <ORIGINAL> --folder <PATH> [--output <PATH>]
    chimera [OPTIONS]

ARGUMENTS:
    <ORIGINAL>          Image or video to carry the archive (.png, .gif or .mp4)

OPTIONS:
    --file <PATH>       Attach a single file
    --folder <PATH>     Attach a folder including all of its subfolders
    --output <PATH>     Write the result here instead of 'chimera_<name>' next to the original
    --instructions      Explain how to open the hidden contents
    --help              Show this help message
    --version           Display version information

EXAMPLES:
    # Hide secret.txt inside photo.png, creates chimera_photo.png
    chimera photo.png --file secret.txt

    # Hide the docs folder inside clip.mp4, creates chimera_clip.mp4
    chimera clip.mp4 --folder docs

CONFIGURATION:
    chimera looks for an optional configuration file named '{CONFIGURATION_FILE_NAME}' in the
    current directory. It is written in KDL format, for example:

        extensions ".png" ".gif" ".mp4"
        output-prefix "chimera_"
        temp-archive-name "temp_chimera.zip"
"#
    );

    adapter.print(&help_text);
}

pub fn print_instructions(adapter: &dyn Adapter) {
    adapter.print(
        r#"Instructions:

1. Choose an original file (.png, .gif, or .mp4).
2. Attach ONE file (--file) or ONE folder (--folder).
3. chimera writes 'chimera_<basename>.<ext>' next to the original.

How to open:
- Normal usage: open as an image/video.
- Hidden data: rename to '.zip' and open with 7-Zip or WinRAR."#,
    );
}
