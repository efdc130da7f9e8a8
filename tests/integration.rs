/// Integration tests for isomake

use chrono::Utc;
use isomake::{build, io, IsoError};
use proptest::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SECTOR: usize = 2048;

fn write_input(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8 + 1).collect();
    fs::write(&path, data).expect("Failed to write input");
    path
}

#[test]
fn test_reserved_region_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "a.txt", 10);
    let output = dir.path().join("out.iso");

    build(&output, [&input]).expect("Failed to build image");

    let image = fs::read(&output).unwrap();
    assert!(image[..16 * SECTOR].iter().all(|&b| b == 0));
}

#[test]
fn test_descriptor_header_and_timestamp() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "a.txt", 10);
    let output = dir.path().join("out.iso");

    let before = Utc::now();
    build(&output, [&input]).expect("Failed to build image");

    let image = fs::read(&output).unwrap();
    let base = 16 * SECTOR;
    assert_eq!(image[base], 1);
    assert_eq!(&image[base + 1..base + 6], b"CD001");
    assert_eq!(image[base + 6], 1);

    let descriptor = io::read_descriptor(&output).expect("Failed to read descriptor");
    let drift = (descriptor.timestamp() - before).num_seconds().abs();
    assert!(drift <= 5, "timestamp off by {}s", drift);
}

#[test]
fn test_root_records() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "a.txt", 10);
    let output = dir.path().join("out.iso");

    build(&output, [&input]).unwrap();

    let root = io::read_root_records(&output).expect("Failed to read root");
    for record in [&root.self_entry, &root.parent_entry] {
        assert_eq!(record.extent_lba, 18);
        assert_eq!(record.data_length, 2048);
    }
    assert_eq!(root.self_entry.name.as_bytes(), &[0x00]);
    assert_eq!(root.parent_entry.name.as_bytes(), &[0x01]);
}

#[test]
fn test_end_to_end_example() {
    let dir = TempDir::new().unwrap();
    let a = write_input(dir.path(), "a.txt", 10);
    let b = write_input(dir.path(), "b.bin", 5000);
    let output = dir.path().join("out.iso");

    let report = build(&output, [&a, &b]).expect("Failed to build image");

    let a_entry = report.file("a.txt").expect("a.txt missing");
    let b_entry = report.file("b.bin").expect("b.bin missing");
    assert_eq!(a_entry.lba, 19);
    assert_eq!(b_entry.lba, 20);
    assert_eq!(report.next_lba, 23);
    assert_eq!(report.total_bytes(), 5010);

    let image = fs::read(&output).unwrap();
    assert_eq!(&image[19 * SECTOR..19 * SECTOR + 10], fs::read(&a).unwrap().as_slice());
    assert_eq!(&image[20 * SECTOR..20 * SECTOR + 5000], fs::read(&b).unwrap().as_slice());

    let a_record = io::read_record_after(&output, a_entry).unwrap();
    assert_eq!((a_record.extent_lba, a_record.data_length), (19, 10));
    assert_eq!(a_record.name.as_bytes(), b"a.txt");

    let b_record = io::read_record_after(&output, b_entry).unwrap();
    assert_eq!((b_record.extent_lba, b_record.data_length), (20, 5000));
    assert_eq!(b_record.name.as_bytes(), b"b.bin");

    // The image ends with the last file's record, no padding or terminator
    assert_eq!(image.len(), 20 * SECTOR + 5000 + 33 + 5);
}

#[test]
fn test_skipped_input_transparent_to_allocation() {
    let dir = TempDir::new().unwrap();
    let a = write_input(dir.path(), "a.txt", 3000);
    let missing = dir.path().join("missing.bin");
    let c = write_input(dir.path(), "c.dat", 1);
    let output = dir.path().join("out.iso");

    let report = build(&output, [&a, &missing, &c]).expect("Failed to build image");

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.file("a.txt").unwrap().lba, 19);
    assert_eq!(report.file("c.dat").unwrap().lba, 21);
    assert!(report.has_skipped());
    assert_eq!(report.skipped[0].path, missing);
    assert!(matches!(report.skipped[0].error, IsoError::InputOpen { .. }));
}

#[test]
fn test_no_inputs_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.iso");

    let result = build(&output, Vec::<PathBuf>::new());
    assert!(matches!(result, Err(IsoError::InvalidArguments(_))));
    assert!(!output.exists());
}

#[test]
fn test_all_inputs_missing_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.iso");

    let report = build(&output, [dir.path().join("nope")]).expect("Build should succeed");
    assert!(report.files.is_empty());
    assert_eq!(report.next_lba, 19);
    assert!(output.exists());
}

#[test]
fn test_directory_input_skipped() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let a = write_input(dir.path(), "a.txt", 4);
    let output = dir.path().join("out.iso");

    let report = build(&output, [&sub, &a]).unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.file("a.txt").unwrap().lba, 19);
}

#[test]
fn test_sector_aligned_file() {
    let dir = TempDir::new().unwrap();
    let a = write_input(dir.path(), "a.bin", 2048);
    let b = write_input(dir.path(), "b.bin", 1);
    let output = dir.path().join("out.iso");

    let report = build(&output, [&a, &b]).unwrap();
    assert_eq!(report.file("b.bin").unwrap().lba, 20);

    // a.bin's record lands at the start of sector 20 and is overwritten by b.bin's payload
    let image = fs::read(&output).unwrap();
    assert_eq!(image[20 * SECTOR], fs::read(&b).unwrap()[0]);
}

#[test]
fn test_empty_file_shares_lba_with_next() {
    let dir = TempDir::new().unwrap();
    let empty = write_input(dir.path(), "empty.bin", 0);
    let b = write_input(dir.path(), "b.bin", 5);
    let output = dir.path().join("out.iso");

    let report = build(&output, [&empty, &b]).expect("Failed to build image");

    let empty_entry = report.file("empty.bin").expect("empty.bin missing");
    let b_entry = report.file("b.bin").expect("b.bin missing");
    assert_eq!(empty_entry.lba, 19);
    assert_eq!(empty_entry.sector_count(), 0);
    assert_eq!(b_entry.lba, 19);
    assert_eq!(report.next_lba, 20);

    // empty.bin's record (42 bytes at the start of sector 19) is covered by
    // b.bin's payload and the 38-byte record that follows it
    let image = fs::read(&output).unwrap();
    assert_eq!(&image[19 * SECTOR..19 * SECTOR + 5], fs::read(&b).unwrap().as_slice());
    assert_eq!(image.len(), 19 * SECTOR + 5 + 38);

    let record = io::read_record_after(&output, b_entry).unwrap();
    assert_eq!((record.extent_lba, record.data_length), (19, 5));
    assert_eq!(record.name.as_bytes(), b"b.bin");

    // Reading at empty.bin's slot finds b.bin's payload, not a record
    assert!(io::read_record_after(&output, empty_entry).is_err());
}

#[test]
fn test_record_spilling_past_sector_boundary() {
    let dir = TempDir::new().unwrap();
    let a = write_input(dir.path(), "a.bin", 2040);
    let b = write_input(dir.path(), "b.bin", 10);
    let output = dir.path().join("out.iso");

    let report = build(&output, [&a, &b]).expect("Failed to build image");

    let a_entry = report.file("a.bin").unwrap();
    let b_entry = report.file("b.bin").unwrap();
    assert_eq!(a_entry.lba, 19);
    assert_eq!(b_entry.lba, 20);
    assert_eq!(report.next_lba, 21);

    let image = fs::read(&output).unwrap();

    // The first 8 bytes of a.bin's record stay in sector 19
    let tail = 19 * SECTOR + 2040;
    assert_eq!(&image[tail..tail + 8], &[38, 0, 19, 0, 0, 0, 0, 0]);

    // The 30 spilled bytes are overwritten by b.bin's payload and record
    assert_eq!(&image[20 * SECTOR..20 * SECTOR + 10], fs::read(&b).unwrap().as_slice());
    let record = io::read_record_after(&output, b_entry).unwrap();
    assert_eq!((record.extent_lba, record.data_length), (20, 10));
    assert_eq!(image.len(), 20 * SECTOR + 10 + 38);

    // a.bin's record no longer decodes
    assert!(matches!(
        io::read_record_after(&output, a_entry),
        Err(IsoError::ParseError { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_lba_is_prefix_sum_of_sectors(sizes in proptest::collection::vec(0usize..7000, 1..6)) {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<PathBuf> = sizes
            .iter()
            .enumerate()
            .map(|(i, &len)| write_input(dir.path(), &format!("f{}.bin", i), len))
            .collect();
        let output = dir.path().join("out.iso");

        let report = build(&output, &inputs).unwrap();

        let mut expected = 19u32;
        for (entry, &len) in report.files.iter().zip(&sizes) {
            prop_assert_eq!(entry.lba, expected);
            prop_assert_eq!(entry.size as usize, len);
            expected += len.div_ceil(SECTOR) as u32;
        }
        prop_assert_eq!(report.next_lba, expected);
    }
}
