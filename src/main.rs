fn main() {
    #[cfg(feature = "cli")]
    hcasl::cli::run(hcasl::io::Mode::Bytes, "hcasl");

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("hcasl: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
