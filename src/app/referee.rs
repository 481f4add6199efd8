use std::io::{self, BufRead, Write};

use rand::prelude::*;

use crate::control::{TurnEngine, Wall};
use crate::error::EngineError;
use crate::hand::{create_tenpai_judge, PlaceholderScorer};
use crate::model::*;
use crate::util::log::set_debug;
use crate::util::misc::*;
use crate::{error, info, warn};

// [App]
// 1行1リクエストのJSONを標準入力から読み込み,応答を標準出力に書き出す
#[derive(Debug)]
pub struct RefereeApp {
    seed: Option<u64>,
    wall_file: String,
    tenpai: String,
    debug: bool,
}

impl RefereeApp {
    pub fn new(args: Vec<String>) -> Self {
        Self::parse_args(&args).unwrap_or_else(|e| {
            error!("{}", e);
            std::process::exit(0);
        })
    }

    // オプションの解析 設定の誤りは入力を読み込む前に検出する
    fn parse_args(args: &[String]) -> Result<Self, String> {
        let mut app = Self {
            seed: None,
            wall_file: String::new(),
            tenpai: "none".into(),
            debug: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = Some(next_value(&mut it, s)),
                "-w" => app.wall_file = next_value(&mut it, s),
                "-tenpai" => app.tenpai = next_value(&mut it, s),
                "-d" => app.debug = true,
                opt => return Err(format!("unknown option: {}", opt)),
            }
        }
        create_tenpai_judge(&app.tenpai)?;

        Ok(app)
    }

    pub fn run(&mut self) {
        set_debug(self.debug);
        let stdin = io::stdin();
        let stdout = io::stdout();
        if let Err(e) = self.serve(stdin.lock(), stdout.lock()) {
            error!("{}", e);
        }
    }

    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Res {
        let wall = self.create_wall()?;
        let mut lines = input.lines();

        // 局開始 設定が不正な場合は再送信を待つ
        let mut engine = loop {
            let line = match lines.next() {
                Some(l) => l?,
                None => {
                    info!("input closed before round start");
                    return Ok(());
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let res = serde_json::from_str::<StartRequest>(&line)
                .map_err(|e| EngineError::Json(e.to_string()))
                .and_then(|req| {
                    let tenpai = create_tenpai_judge(&self.tenpai).map_err(EngineError::Internal)?;
                    TurnEngine::start(&req, wall.clone(), tenpai, Box::new(PlaceholderScorer))
                });
            match res {
                Ok((engine, res)) => {
                    write_json(&mut output, &res)?;
                    break engine;
                }
                Err(e) => {
                    write_error(&mut output, &e)?;
                    if e.is_fatal() {
                        return Err(e.into());
                    }
                }
            }
        };

        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let res = serde_json::from_str::<Vec<TurnRequest>>(&line)
                .map_err(|e| EngineError::Json(e.to_string()))
                .and_then(|reqs| Intent::from_requests(&reqs))
                .and_then(|intent| engine.next(intent));
            match res {
                Ok(res) => {
                    write_json(&mut output, &res)?;
                    if res.is_end() {
                        return Ok(());
                    }
                }
                Err(e) => {
                    write_error(&mut output, &e)?;
                    if e.is_fatal() {
                        return Err(e.into());
                    }
                }
            }
        }

        info!("input closed before round end");
        Ok(())
    }

    fn create_wall(&self) -> Res<Wall> {
        if !self.wall_file.is_empty() {
            let exp = std::fs::read_to_string(&self.wall_file)?;
            let wall = Wall::from_permutation(tiles_from_ids(&exp)?)?;
            info!("wall loaded: {}", self.wall_file);
            return Ok(wall);
        }

        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!("wall seed: {}", seed);
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        Ok(Wall::shuffled(&mut rng))
    }
}

fn write_json<W: Write, T: serde::Serialize>(output: &mut W, value: &T) -> Res {
    writeln!(output, "{}", serde_json::to_string(value)?)?;
    output.flush()?;
    Ok(())
}

fn write_error<W: Write>(output: &mut W, e: &EngineError) -> Res {
    warn!("{}", e);
    write_json(output, &ErrorResponse::from(e))
}

#[cfg(test)]
fn serve_lines(app: &mut RefereeApp, input: &str) -> Vec<serde_json::Value> {
    let mut output = vec![];
    app.serve(input.as_bytes(), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_serve_ron() {
    let wall = Wall::arranged(
        &[
            "m147p147s147z1236",
            "m1199p2288s33z557",
            "m258p258s258z1234",
            "m369p369s369z1234",
        ],
        "z7",
        1,
    )
    .unwrap();
    let ids: Vec<String> = wall.tiles().iter().map(|t| t.id().to_string()).collect();
    let path = std::env::temp_dir().join(format!("referee_wall_{}.txt", std::process::id()));
    std::fs::write(&path, ids.join(" ")).unwrap();

    let mut app = RefereeApp::new(vec![
        "-w".into(),
        path.to_string_lossy().into_owned(),
        "-tenpai".into(),
        "scan".into(),
    ]);
    let input = [
        r#"{"prevailing_wind": 0, "remaining_dealer": 0, "riichi": [true, true, true, true]}"#,
        r#"not json"#,
        r#"[{"ok": true}]"#,
        r#"[{"discard": 14}]"#,
        r#"[{"discard": -1}]"#,
        "",
        r#"[{"discard": 13}]"#,
        r#"[{"ok": true}]"#,
        r#"[{"ok": true}]"#,
    ]
    .join("\n");
    let out = serve_lines(&mut app, &input);
    std::fs::remove_file(&path).unwrap();

    // 局終了後の入力は読み込まない
    assert_eq!(out.len(), 7);

    assert_eq!(out[0]["type"], "Action");
    assert_eq!(out[0]["action"]["phase"], "AwaitingDiscard");
    assert_eq!(out[0]["table"]["fingerprint"], wall.fingerprint());
    assert_eq!(out[0]["table"]["players"][1]["readiness"], "Ready");
    assert!(out[0]["table"].get("wall").is_none());

    assert_eq!(out[1]["error"], -2);
    assert_eq!(out[2]["error"], -4);
    assert_eq!(out[3]["error"], -3);
    // 負のindexも範囲外の打牌として扱う
    assert_eq!(out[4]["error"], -3);

    assert_eq!(out[5]["action"]["phase"], "AwaitingRonDecision");
    assert_eq!(out[5]["action"]["players"][0]["id"], 1);

    assert_eq!(out[6]["type"], "End");
    assert_eq!(out[6]["end"]["reason"], "Ron");
    assert_eq!(out[6]["end"]["players"][1]["win"], "Ron");
    assert_eq!(out[6]["end"]["players"][1]["yaku"][0], 200);
    assert_eq!(out[6]["end"]["players"][0]["score"], -1);
    assert_eq!(out[6]["table"]["wall"].as_array().map(|w| w.len()), Some(TILE_COUNT));
}

#[test]
fn test_parse_args() {
    let args: Vec<String> = vec!["-tenpai".into(), "scan".into(), "-d".into()];
    let app = RefereeApp::parse_args(&args).unwrap();
    assert_eq!(app.tenpai, "scan");
    assert!(app.debug);

    assert!(RefereeApp::parse_args(&["-tenpai".to_string(), "oracle".to_string()]).is_err());
    assert!(RefereeApp::parse_args(&["-x".to_string()]).is_err());
}

#[test]
fn test_serve_start_retry() {
    let mut app = RefereeApp::new(vec!["-s".into(), "7".into()]);
    let input = [
        r#"{"prevailing_wind": 5, "remaining_dealer": 0}"#,
        r#"{"prevailing_wind": 0, "remaining_dealer": 0}"#,
    ]
    .join("\n");
    let out = serve_lines(&mut app, &input);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["error"], -3);
    assert_eq!(out[1]["type"], "Action");
    assert_eq!(out[1]["table"]["wall_count"], DEAL_COUNT);
}
