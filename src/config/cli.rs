use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pokedex-acquire")]
#[command(about = "Download the Pokédex image dataset from Roboflow into data/pokedex")]
pub struct CliArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Download again even if data/pokedex already holds data
    #[arg(long)]
    pub overwrite: bool,

    /// Resolve the dataset version and report what would happen, without downloading
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_matches_plain_run() {
        let args = CliArgs::try_parse_from(["pokedex-acquire"]).unwrap();
        assert!(!args.verbose);
        assert!(!args.overwrite);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_flags() {
        let args =
            CliArgs::try_parse_from(["pokedex-acquire", "-v", "--overwrite", "--dry-run"]).unwrap();
        assert!(args.verbose && args.overwrite && args.dry_run);
        assert!(CliArgs::try_parse_from(["pokedex-acquire", "extra"]).is_err());
    }
}
