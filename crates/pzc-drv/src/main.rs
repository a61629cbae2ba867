fn main() {
    if let Err(e) = pzc_drv::main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
