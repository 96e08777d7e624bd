use sdbin::constants::{HEADER_LENGTH, MIN_INPUT_SIZE, SALT, SALT_OFFSET, header_tag};
use sdbin::{Checksum, ErrorKind, NoOpReporter, ProgressReporter, encode_file};
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// firmware-shaped image: `fill` up to the salt, the salt, then `tail`
fn firmware_image(fill: impl Fn(usize) -> u8, tail: &[u8]) -> Vec<u8> {
    let mut image: Vec<u8> = (0..SALT_OFFSET as usize).map(fill).collect();
    image.extend_from_slice(SALT);
    image.extend_from_slice(tail);
    image
}

fn write_input(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

fn encode(input: &Path, output: &Path) -> Result<sdbin::EncodeSummary, sdbin::EncodeError> {
    encode_file(input, output, &NoOpReporter)
}

#[test]
fn known_image_produces_known_container() {
    let dir = TempDir::new().unwrap();
    let image = firmware_image(|_| 0xAA, &[]);
    assert_eq!(image.len() as u64, MIN_INPUT_SIZE);
    let input = write_input(&dir, "fw.bin", &image);
    let output = dir.path().join("SD_CarDV.bin");

    let summary = encode(&input, &output).unwrap();

    assert_eq!(summary.checksum.to_hex(), "9d8638eaf4a3f4c81af25f27b67539e4");
    assert_eq!(summary.input_size, 893_408);
    assert_eq!(summary.output_size, 893_440);

    let container = fs::read(&output).unwrap();
    assert_eq!(container.len(), 893_440);
    assert_eq!(&container[..16], header_tag());
    assert_eq!(&container[16..32], summary.checksum.as_bytes());
    assert_eq!(&container[HEADER_LENGTH..], &image[..]);
}

#[test]
fn payload_after_salt_is_copied_and_hashed() {
    let dir = TempDir::new().unwrap();
    let image = firmware_image(|i| (i % 251) as u8, b"tail");
    let input = write_input(&dir, "fw.bin", &image);
    let output = dir.path().join("out.bin");

    let summary = encode(&input, &output).unwrap();

    assert_eq!(summary.checksum.to_hex(), "71a73f69848b8e50114f19c2ebae1209");
    let container = fs::read(&output).unwrap();
    assert_eq!(container.len(), image.len() + HEADER_LENGTH);
    assert_eq!(&container[HEADER_LENGTH..], &image[..]);
}

#[test]
fn encoding_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let image = firmware_image(|i| (i * 7) as u8, b"more firmware");
    let input = write_input(&dir, "fw.bin", &image);
    let first = dir.path().join("first.bin");
    let second = dir.path().join("second.bin");

    encode(&input, &first).unwrap();
    encode(&input, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn existing_output_is_replaced() {
    let dir = TempDir::new().unwrap();
    let image = firmware_image(|_| 0xAA, &[]);
    let input = write_input(&dir, "fw.bin", &image);
    let output = write_input(&dir, "SD_CarDV.bin", &vec![0xFF; 2_000_000]);

    encode(&input, &output).unwrap();

    assert_eq!(fs::metadata(&output).unwrap().len(), 893_440);
}

#[test]
fn missing_salt_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let mut image = firmware_image(|_| 0xAA, &[]);
    image[SALT_OFFSET as usize..].fill(0);
    let input = write_input(&dir, "fw.bin", &image);
    let output = dir.path().join("SD_CarDV.bin");

    let err = encode(&input, &output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatMismatch);
    let message = err.to_string();
    assert!(message.contains("5644524143393939"));
    assert!(message.contains("0000000000000000"));
    assert!(!output.exists());
}

#[test]
fn short_input_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "fw.bin", &vec![0xAA; 4096]);
    let output = dir.path().join("SD_CarDV.bin");

    let err = encode(&input, &output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ShortRead);
    assert_eq!(
        err.to_string(),
        "tried to read the stored salt: only managed 0 out of 8 bytes"
    );
    assert!(!output.exists());
}

#[test]
fn truncated_salt_is_a_short_read() {
    let dir = TempDir::new().unwrap();
    let mut image = firmware_image(|_| 0xAA, &[]);
    image.truncate(SALT_OFFSET as usize + 3);
    let input = write_input(&dir, "fw.bin", &image);
    let output = dir.path().join("SD_CarDV.bin");

    let err = encode(&input, &output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ShortRead);
    assert!(err.to_string().ends_with("only managed 3 out of 8 bytes"));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_an_access_error() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("SD_CarDV.bin");

    let err = encode(&dir.path().join("nope.bin"), &output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Access);
    assert!(err.to_string().starts_with("unable to access"));
    assert!(!output.exists());
}

#[test]
fn output_in_missing_directory_is_an_access_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "fw.bin", &firmware_image(|_| 0xAA, &[]));
    let output = dir.path().join("no").join("such").join("dir.bin");

    let err = encode(&input, &output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Access);
    assert!(err.to_string().starts_with("unable to create"));
}

#[test]
fn output_over_input_is_refused() {
    let dir = TempDir::new().unwrap();
    let image = firmware_image(|_| 0xAA, &[]);
    let input = write_input(&dir, "fw.bin", &image);

    let err = encode(&input, &input).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Access);
    assert_eq!(fs::read(&input).unwrap(), image);
}

#[test]
fn hard_linked_output_is_refused() {
    let dir = TempDir::new().unwrap();
    let image = firmware_image(|_| 0xAA, &[]);
    let input = write_input(&dir, "fw.bin", &image);
    let link = dir.path().join("SD_CarDV.bin");
    fs::hard_link(&input, &link).unwrap();

    let err = encode(&input, &link).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Access);
    assert_eq!(fs::read(&input).unwrap(), image);
    assert_eq!(fs::read(&link).unwrap(), image);
}

#[cfg(unix)]
#[test]
fn device_output_is_refused() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "fw.bin", &firmware_image(|_| 0xAA, &[]));
    let null = Path::new("/dev/null");

    let err = encode(&input, null).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Access);
    assert!(err.to_string().contains("not a regular file"));
    assert!(null.exists());
}

/// grows the input by a few bytes once the output exists
struct GrowInput {
    input: PathBuf,
    output: PathBuf,
}

impl ProgressReporter for GrowInput {
    fn on_start(&self, _total_bytes: u64) {
        assert!(self.output.exists());
        let mut file = OpenOptions::new().append(true).open(&self.input).unwrap();
        file.write_all(b"late").unwrap();
    }
    fn on_progress(&self, _: u64, _: u64) {}
    fn on_complete(&self, _: &Checksum) {}
}

#[test]
fn input_growing_mid_run_removes_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "fw.bin", &firmware_image(|_| 0xAA, &[]));
    let output = dir.path().join("SD_CarDV.bin");
    let reporter = GrowInput {
        input: input.clone(),
        output: output.clone(),
    };

    let err = encode_file(&input, &output, &reporter).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Copy);
    assert!(
        err.to_string()
            .contains("got extra bytes, got 893412 but wanted 893408 bytes")
    );
    assert!(!output.exists());
}

#[derive(Default)]
struct Events(RefCell<Vec<String>>);

impl ProgressReporter for Events {
    fn on_sanity_passed(&self, salt_offset: u64) {
        self.0.borrow_mut().push(format!("sanity {salt_offset}"));
    }
    fn on_start(&self, total_bytes: u64) {
        self.0.borrow_mut().push(format!("start {total_bytes}"));
    }
    fn on_progress(&self, _: u64, _: u64) {}
    fn on_complete(&self, _: &Checksum) {
        self.0.borrow_mut().push("complete".to_string());
    }
}

#[test]
fn sanity_is_reported_before_the_copy() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "fw.bin", &firmware_image(|_| 0xAA, &[]));
    let output = dir.path().join("SD_CarDV.bin");
    let events = Events::default();

    encode_file(&input, &output, &events).unwrap();

    assert_eq!(
        *events.0.borrow(),
        ["sanity 893400", "start 893408", "complete"]
    );
}

#[test]
fn failed_sanity_is_not_reported_as_passed() {
    let dir = TempDir::new().unwrap();
    let mut image = firmware_image(|_| 0xAA, &[]);
    image[SALT_OFFSET as usize] = b'X';
    let input = write_input(&dir, "fw.bin", &image);
    let output = dir.path().join("SD_CarDV.bin");
    let events = Events::default();

    let err = encode_file(&input, &output, &events).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatMismatch);
    assert!(events.0.borrow().is_empty());
    assert!(!output.exists());
}
