fn main() {
    if let Err(err) = monitor_compare::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
