extern crate clap;
use clap::*;

mod cmd_segpile;

fn main() -> anyhow::Result<()> {
    let app = Command::new("segpile")
        .version(crate_version!())
        .about("`segpile` - find pile-up regions in DNA match segments")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_segpile::depth::make_subcommand())
        .after_help(
            r###"Pile-up regions are stretches of a chromosome covered by unusually many
DNA match segments, often population-level artifacts rather than close
relatedness. `segpile depth` counts the overlapping matches at every
segment boundary on one chromosome.

"###,
        );

    // Check which subcommand the user ran...
    match app.get_matches().subcommand() {
        Some(("depth", sub_matches)) => cmd_segpile::depth::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
