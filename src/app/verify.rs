use crate::control::{verify_fingerprint, Wall};
use crate::error;
use crate::model::*;
use crate::util::misc::*;

// 局終了後に公開された牌山と局開始時のハッシュ値を照合する
#[derive(Debug)]
pub struct VerifyApp {
    fingerprint: String,
    tail: String,
    wall_file: String,
}

impl VerifyApp {
    pub fn new(args: Vec<String>) -> Self {
        use std::process::exit;

        let mut app = Self {
            fingerprint: String::new(),
            tail: String::new(),
            wall_file: String::new(),
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-f" => app.fingerprint = next_value(&mut it, s),
                "-t" => app.tail = next_value(&mut it, s),
                "-w" => app.wall_file = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    exit(0);
                }
            }
        }

        if app.fingerprint.is_empty() {
            error!("fingerprint(-f) not specified");
            exit(0);
        }
        if app.tail.is_empty() == app.wall_file.is_empty() {
            error!("specify either tiles(-t) or wall file(-w)");
            exit(0);
        }

        app
    }

    pub fn run(&mut self) {
        match self.verify() {
            Ok(true) => println!("ok"),
            Ok(false) => println!("ng"),
            Err(e) => error!("{}", e),
        }
    }

    fn verify(&self) -> Res<bool> {
        let tail = if self.wall_file.is_empty() {
            tiles_from_ids(&self.tail)?
        } else {
            let exp = std::fs::read_to_string(&self.wall_file)?;
            let wall = Wall::from_permutation(tiles_from_ids(&exp)?)?;
            wall.undealt_tail().to_vec()
        };
        Ok(verify_fingerprint(&tail, &self.fingerprint))
    }
}

#[test]
fn test_verify() {
    let wall = Wall::arranged(&["m123", "", "", ""], "", 3).unwrap();
    let ids: Vec<String> = wall
        .undealt_tail()
        .iter()
        .map(|t| t.id().to_string())
        .collect();

    let app = VerifyApp::new(vec![
        "-f".into(),
        wall.fingerprint().to_uppercase(),
        "-t".into(),
        ids.join(","),
    ]);
    assert!(app.verify().unwrap());

    let app = VerifyApp::new(vec![
        "-f".into(),
        wall.fingerprint().into(),
        "-t".into(),
        ids[1..].join(","),
    ]);
    assert!(!app.verify().unwrap());

    let app = VerifyApp::new(vec!["-f".into(), "00".into(), "-t".into(), "x".into()]);
    assert!(app.verify().is_err());
}
