fn main() {
    #[cfg(feature = "cli")]
    hcasl::cli::run(hcasl::io::Mode::Chars, "hcasl-char");

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("hcasl-char: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
