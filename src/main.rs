use std::io;

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    chess_engine::uci::run(stdin.lock(), stdout.lock());
}
