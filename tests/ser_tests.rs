#![cfg(feature = "serde")]

use nbt_tree::{Compound, List, NbtFile};

#[test]
fn test_serialize_tree_to_json() {
    let mut pos = List::new();
    pos.add_range([1.5f64, -2.0]).unwrap();

    let mut root = Compound::new();
    root.add(("name", "Steve")).unwrap();
    root.add(("health", 20i16)).unwrap();
    root.add(("pos", pos)).unwrap();
    root.add(("bytes", vec![-1i8, 1])).unwrap();
    root.add(("empty", Compound::new())).unwrap();

    let file = NbtFile::from_compound("Player", root);
    let json = serde_json::to_string(&file).unwrap();
    assert_eq!(
        json,
        r#"{"Player":{"name":"Steve","health":20,"pos":[1.5,-2.0],"bytes":[-1,1],"empty":{}}}"#
    );
}

#[test]
fn test_serialize_empty_file() {
    assert_eq!(serde_json::to_string(&NbtFile::default()).unwrap(), "{}");
}
