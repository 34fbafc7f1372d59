use std::io::{Cursor, Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use nbt_tree::{
    BigEndian, Compound, Compression, List, LittleEndian, NbtFile, ReadOptions, Tag, TagID,
    WriteOptions, read_root, write_root,
};

const SCENARIO_A: [u8; 20] = [
    0x0A, 0x00, 0x04, 0x72, 0x6F, 0x6F, 0x74, 0x03, 0x00, 0x05, 0x76, 0x61, 0x6C, 0x75, 0x65, 0x00,
    0x00, 0x00, 0x2A, 0x00,
];

fn simple_file() -> NbtFile {
    let mut root = Compound::new();
    root.add(("value", 42)).unwrap();
    NbtFile::new(("root", root)).unwrap()
}

fn full_file() -> NbtFile {
    let mut nested = Compound::new();
    nested.add(("name", "Bananrama")).unwrap();
    nested.add(("value", 0.5f32)).unwrap();

    let mut egg = Compound::new();
    egg.add(("name", "Eggbert")).unwrap();
    egg.add(("value", 0.5f32)).unwrap();

    let mut compounds = List::new();
    compounds.add(egg).unwrap();
    compounds.add(Compound::new()).unwrap();

    let mut nested_lists = List::new();
    nested_lists.add(List::from_tags([1i8, 2, 3]).unwrap()).unwrap();
    nested_lists.add(List::with_type(TagID::String).unwrap()).unwrap();

    let mut root = Compound::new();
    root.add(("byte", i8::MIN)).unwrap();
    root.add(("short", i16::MAX)).unwrap();
    root.add(("int", -1)).unwrap();
    root.add(("long", i64::MIN)).unwrap();
    root.add(("float", 0.498_231_47f32)).unwrap();
    root.add(("double", 0.493_128_713_218_231_5f64)).unwrap();
    root.add(("string", "HELLO WORLD THIS IS A TEST STRING \u{c5}\u{c4}\u{d6}!")).unwrap();
    root.add(("bytes", (0..100).map(|n| (n * n % 251) as u8 as i8).collect::<Vec<_>>())).unwrap();
    root.add(("ints", vec![i32::MIN, 0, i32::MAX])).unwrap();
    root.add(("longs", List::from_tags([11i64, 12, 13, 14, 15]).unwrap())).unwrap();
    root.add(("compounds", compounds)).unwrap();
    root.add(("nested lists", nested_lists)).unwrap();
    root.add(("untyped", List::new())).unwrap();
    root.add(("nested", nested)).unwrap();
    root.add(("empty name", Compound::new())).unwrap();
    root.add(("", 7i16)).unwrap();
    NbtFile::new(("Level", root)).unwrap()
}

#[test]
fn test_scenario_a_exact_bytes() {
    let bytes = simple_file().to_bytes(Compression::None).unwrap();
    assert_eq!(bytes, SCENARIO_A);
}

#[test]
fn test_scenario_a_read() {
    let file = NbtFile::from_bytes(&SCENARIO_A, Compression::None).unwrap();
    assert_eq!(file.root_name(), Some("root"));
    assert_eq!(file.root().unwrap().get_as::<i32>("value").unwrap(), Some(42));
    assert_eq!(file.file_compression(), Some(Compression::None));
}

#[test]
fn test_scenario_b_gzip_auto_detect() {
    let file = simple_file();
    let bytes = file.to_bytes(Compression::GZip).unwrap();
    assert_eq!(bytes[0], 0x1F);

    let loaded = NbtFile::from_bytes(&bytes, Compression::AutoDetect).unwrap();
    assert_eq!(loaded, file);
    assert_eq!(loaded.file_compression(), Some(Compression::GZip));
}

#[test]
fn test_round_trip_all_containers() {
    let file = full_file();
    for compression in [Compression::None, Compression::GZip, Compression::ZLib] {
        let bytes = file.to_bytes(compression).unwrap();
        let explicit = NbtFile::from_bytes(&bytes, compression).unwrap();
        assert_eq!(explicit, file, "{compression:?}");
        let detected = NbtFile::from_bytes(&bytes, Compression::AutoDetect).unwrap();
        assert_eq!(detected, file, "{compression:?}");
        assert_eq!(detected.file_compression(), Some(compression));
    }
}

#[test]
fn test_round_trip_preserves_order_and_list_types() {
    let file = full_file();
    let bytes = file.to_bytes(Compression::None).unwrap();
    let loaded = NbtFile::from_bytes(&bytes, Compression::None).unwrap();
    let root = loaded.root().unwrap();

    let names: Vec<_> = root.names().collect();
    let expected: Vec<_> = file.root().unwrap().names().collect();
    assert_eq!(names, expected);

    let untyped = root.get_as::<&List>("untyped").unwrap().unwrap();
    assert_eq!(untyped.element_type(), None);

    let nested_lists = root.get_as::<&List>("nested lists").unwrap().unwrap();
    let empty_strings = nested_lists.get_as::<&List>(1).unwrap();
    assert!(empty_strings.is_empty());
    assert_eq!(empty_strings.element_type(), Some(TagID::String));
}

#[test]
fn test_gzip_is_standard() {
    let file = simple_file();
    let bytes = file.to_bytes(Compression::GZip).unwrap();
    let mut raw = Vec::new();
    GzDecoder::new(&bytes[..]).read_to_end(&mut raw).unwrap();
    assert_eq!(raw, SCENARIO_A);
}

#[test]
fn test_zlib_is_standard() {
    let file = full_file();
    let bytes = file.to_bytes(Compression::ZLib).unwrap();
    assert_eq!(&bytes[..2], &[0x78, 0x01]);

    // A standard zlib decoder checks the Adler32 trailer.
    let mut raw = Vec::new();
    ZlibDecoder::new(&bytes[..]).read_to_end(&mut raw).unwrap();
    assert_eq!(raw, file.to_bytes(Compression::None).unwrap());
}

#[test]
fn test_read_foreign_zlib() {
    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
    encoder.write_all(&SCENARIO_A).unwrap();
    let bytes = encoder.finish().unwrap();
    assert_eq!(bytes[0], 0x78);

    let loaded = NbtFile::from_bytes(&bytes, Compression::AutoDetect).unwrap();
    assert_eq!(loaded, simple_file());
}

#[test]
fn test_zlib_trailer_not_verified() {
    let mut bytes = simple_file().to_bytes(Compression::ZLib).unwrap();
    let len = bytes.len();
    bytes[len - 1] ^= 0xFF;
    let loaded = NbtFile::from_bytes(&bytes, Compression::ZLib).unwrap();
    assert_eq!(loaded, simple_file());
}

#[test]
fn test_write_without_root_is_noop() {
    let file = NbtFile::default();
    for compression in [Compression::None, Compression::GZip, Compression::ZLib] {
        assert!(file.to_bytes(compression).unwrap().is_empty());
    }
}

#[test]
fn test_compression_level_and_buffer() {
    let file = full_file();
    let mut stored = Vec::new();
    file.write_to_with(
        &mut stored,
        &WriteOptions::new(Compression::GZip).with_level(0).with_buffer_size(16),
    )
    .unwrap();
    let mut best = Vec::new();
    file.write_to_with(&mut best, &WriteOptions::new(Compression::GZip).with_level(9))
        .unwrap();
    assert!(best.len() < stored.len());

    let options = ReadOptions::new(Compression::GZip).with_buffer_size(16);
    assert_eq!(NbtFile::read_from_with(Cursor::new(&stored), &options).unwrap(), file);
}

#[test]
fn test_read_from_stream() {
    let bytes = full_file().to_bytes(Compression::ZLib).unwrap();
    let loaded = NbtFile::read_from_stream(&bytes[..], Compression::ZLib).unwrap();
    assert_eq!(loaded, full_file());
}

#[test]
fn test_read_root_name() {
    let file = full_file();
    for compression in [Compression::None, Compression::GZip, Compression::ZLib] {
        let bytes = file.to_bytes(compression).unwrap();
        let name = NbtFile::read_root_name(Cursor::new(&bytes), Compression::AutoDetect).unwrap();
        assert_eq!(name, "Level");
    }
}

#[test]
fn test_little_endian_codec() {
    let file = full_file();
    let mut out = Vec::new();
    write_root::<LittleEndian, _>(&mut out, "Level", file.root().unwrap()).unwrap();

    let (name, root) = read_root::<LittleEndian, _>(&out[..], 512).unwrap();
    assert_eq!(name, "Level");
    assert_eq!(&root, file.root().unwrap());

    let mut big = Vec::new();
    write_root::<BigEndian, _>(&mut big, "Level", &root).unwrap();
    assert_ne!(out, big);
}

#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!("nbt_tree_{}.dat", std::process::id()));
    let file = full_file();
    file.save(&path, Compression::GZip).unwrap();
    let loaded = NbtFile::load(&path, Compression::AutoDetect).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, file);
}

#[test]
fn test_edit_after_read() {
    let mut file = NbtFile::from_bytes(&SCENARIO_A, Compression::None).unwrap();
    let root = file.root_mut().unwrap();
    root.insert("value", 43);
    root.add(("extra", Tag::Long(1))).unwrap();

    let loaded =
        NbtFile::from_bytes(&file.to_bytes(Compression::None).unwrap(), Compression::None).unwrap();
    let root = loaded.root().unwrap();
    assert_eq!(root["value"], Tag::Int(43));
    assert_eq!(root["extra"], Tag::Long(1));
}

#[test]
fn test_nan_round_trip() {
    let mut floats = List::new();
    floats.add_range([f32::NAN, -f32::NAN, 1.0]).unwrap();

    let mut root = Compound::new();
    root.add(("f", f32::NAN)).unwrap();
    root.add(("d", f64::NAN)).unwrap();
    root.add(("floats", floats)).unwrap();
    let file = NbtFile::from_compound("nan", root);

    for compression in [Compression::None, Compression::GZip, Compression::ZLib] {
        let bytes = file.to_bytes(compression).unwrap();
        let loaded = NbtFile::from_bytes(&bytes, compression).unwrap();
        assert_eq!(loaded, file, "{compression:?}");
        assert_eq!(loaded.to_bytes(compression).unwrap(), bytes);
    }
}

#[test]
fn test_float_equality_is_bitwise() {
    assert_eq!(Tag::Double(f64::NAN), Tag::Double(f64::NAN));
    assert_ne!(Tag::Float(0.0), Tag::Float(-0.0));
    assert_ne!(Tag::Float(1.0), Tag::Double(1.0));
}
