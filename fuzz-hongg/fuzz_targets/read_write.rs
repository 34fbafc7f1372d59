use honggfuzz::fuzz;
use nbt_tree::{BigEndian, Compression, LittleEndian, NbtFile, read_root, write_root};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(file) = NbtFile::from_bytes(data, Compression::AutoDetect) {
                let bytes = file.to_bytes(Compression::None).unwrap();
                let again = NbtFile::from_bytes(&bytes, Compression::None).unwrap();
                assert_eq!(again, file);
            }

            if let Ok((name, root)) = read_root::<LittleEndian, _>(data, 64) {
                let mut out = Vec::new();
                write_root::<LittleEndian, _>(&mut out, &name, &root).unwrap();
                let _ = write_root::<BigEndian, _>(Vec::new(), &name, &root);
            }
        });
    }
}
