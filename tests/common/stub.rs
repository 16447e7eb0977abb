//! A stand-in extraction binary for end-to-end tests.
//!
//! The script emulates just enough of the real tool's CLI surface:
//! search targets print one JSON object per result line, download
//! targets create a transcoded file under the output template's
//! directory and print the intermediate (pre-transcode) filename.
//!
//! Special inputs:
//! - a search query containing `boom` fails with a nonzero exit
//! - a search query containing `empty` succeeds with zero results
//! - a download URL containing `bad_id_xyz` fails with a nonzero exit

use std::fs;
use std::path::{Path, PathBuf};

const STUB_SCRIPT: &str = r#"#!/bin/sh
out=""; fmt="flac"; target=""
prev=""
for a in "$@"; do
  case "$prev" in
    --output|-o) out="$a" ;;
    --audio-format) fmt="$a" ;;
  esac
  case "$a" in
    ytsearch*|http://*|https://*) target="$a" ;;
  esac
  prev="$a"
done

case "$target" in
  ytsearch*)
    query="${target#ytsearch*:}"
    case "$query" in
      *boom*) echo "ERROR: unable to reach the search endpoint" >&2; exit 1 ;;
      *empty*) exit 0 ;;
    esac
    printf '%s\n' '{"id":"vid-001","title":"Stub Track One","duration":181.4,"thumbnail":"https://thumbs.invalid/one.jpg","url":"https://media.invalid/one"}'
    printf '%s\n' '{"id":"vid-002","title":"Stub Track Two","url":"https://media.invalid/two"}'
    exit 0
    ;;
esac

case "$target" in
  *bad_id_xyz*) echo "ERROR: [youtube] bad_id_xyz: Video unavailable" >&2; exit 1 ;;
esac

dir=$(dirname "$out")
mkdir -p "$dir"
sleep 0.1
printf 'stub-audio-payload' > "$dir/Stub Track.$fmt"
printf '%s\n' "$dir/Stub Track.webm"
exit 0
"#;

pub fn write_stub_extractor(dir: &Path) -> PathBuf {
    let path = dir.join("fake-extraction-tool");
    fs::write(&path, STUB_SCRIPT).expect("Failed to write stub extractor");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub extractor executable");
    }

    path
}
