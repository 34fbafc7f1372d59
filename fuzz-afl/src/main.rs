use nbt_tree::{Compression, NbtFile, ReadOptions};

#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let options = ReadOptions::new(Compression::AutoDetect).with_max_depth(64);
        if let Ok(file) = NbtFile::read_from_with(std::io::Cursor::new(data), &options) {
            for compression in [Compression::None, Compression::GZip, Compression::ZLib] {
                let bytes = file.to_bytes(compression).unwrap();
                let again = NbtFile::from_bytes(&bytes, compression).unwrap();
                assert_eq!(again, file);
            }
        }
    });
}
