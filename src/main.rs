#![warn(rust_2018_idioms)]

use mahjong_referee::{app, error};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "S" => {
            // Serve (標準入出力で1局を進行)
            app::RefereeApp::new(args2).run();
        }
        "V" => {
            // Verify (牌山のハッシュ値を照合)
            app::VerifyApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
