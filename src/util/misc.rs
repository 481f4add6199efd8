use std::fmt;

use crate::error_exit;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

// コマンドライン引数のオプション値を取得 不正な値の場合はプロセスを終了
pub fn next_value<T>(it: &mut std::slice::Iter<'_, String>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit!("{}: value missing", opt));
    n.parse()
        .unwrap_or_else(|e| error_exit!("{}: {} '{}'", opt, e, n))
}

pub fn vec_count<T: PartialEq>(v: &[T], e: &T) -> usize {
    v.iter().filter(|&n| n == e).count()
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

#[test]
fn test_vec_helpers() {
    let v = vec![1, 2, 2, 3];
    assert_eq!(vec_count(&v, &2), 2);
    assert_eq!(vec_count(&v, &4), 0);
    assert_eq!(vec_to_string(&v), "[1, 2, 2, 3]");
}
