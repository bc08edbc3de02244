use std::fmt;

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

// nをunitの倍数に切り上げ
#[inline]
pub fn to_next_unit(n: i64, unit: i64) -> i64 {
    let m = n % unit;
    if m == 0 {
        n
    } else {
        n.saturating_add(unit - m)
    }
}

#[test]
fn test_to_next_unit() {
    assert_eq!(to_next_unit(1920, 100), 2000);
    assert_eq!(to_next_unit(2000, 100), 2000);
    assert_eq!(to_next_unit(1, 100), 100);
    assert_eq!(to_next_unit(0, 100), 0);
    assert_eq!(vec_to_string(&[1, 2, 3]), "[1, 2, 3]");
}
