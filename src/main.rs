fn main() {
    if let Err(e) = spinwheel_lib::run() {
        eprintln!("spinwheel: {:#}", e);
        std::process::exit(1);
    }
}
