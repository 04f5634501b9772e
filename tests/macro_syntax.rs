use spark_observable::{is_observable, observable_vec, ObservableVec};

#[test]
fn macro_list_syntax() {
    let letters = observable_vec!["A", "B", "C"];
    assert_eq!(letters, ["A", "B", "C"]);
    assert!(is_observable(&letters));
}

#[test]
fn macro_trailing_comma() {
    let numbers = observable_vec![1, 2, 3,];
    assert_eq!(numbers.len(), 3);
}

#[test]
fn macro_repeat_syntax() {
    let zeros = observable_vec![String::new(); 2];
    assert_eq!(zeros, [String::new(), String::new()]);
}

#[test]
fn macro_empty() {
    let empty: ObservableVec<u8> = observable_vec![];
    assert!(empty.is_empty());
    assert_eq!(empty.listener_count(), 0);
}
