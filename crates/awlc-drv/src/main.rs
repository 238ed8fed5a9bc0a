use clap::Parser;

fn main() {
    let cli = awlc_drv::Cli::parse();
    if let Err(e) = awlc_drv::Session::new(cli).compile() {
        eprintln!("awlc: {e}");
        std::process::exit(1);
    }
}
