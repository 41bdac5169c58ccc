use clap::*;
use itertools::Itertools;
use segpile::libs::ledger::LocusLedger;
use segpile::libs::segment::Segment;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("depth")
        .about("Count overlapping match segments at every boundary locus")
        .after_help(
            r###"
Reads a match-segment CSV export (MyHeritage layout: match name, chromosome,
begin, end and shared centimorgans at fixed columns), keeps the segments on
one chromosome, and reports how many matches cover each stretch between
boundary loci.

The default report has one `chromosome;locus;matches` line per boundary
locus, where `matches` holds from that locus up to the next one. A segment's
end locus is the first locus it no longer covers.

Examples:
1. Tabular report for chromosome 6:
   segpile depth matches.csv --chromosome 6

2. Ignore weak segments, list who starts/stops at each locus:
   segpile depth matches.csv --chromosome 6 --min-cm 8 --names

3. Step series for plotting, x in megabases:
   segpile depth matches.csv --chromosome 6 --plot -o chr6.tsv

"###,
        )
        .arg(
            Arg::new("infile")
                .index(1)
                .default_value("stdin")
                .help("Input match-segment CSV file, plain or .gz (or stdin)"),
        )
        .arg(
            Arg::new("chromosome")
                .long("chromosome")
                .short('c')
                .required(true)
                .num_args(1)
                .value_parser(value_parser!(i32))
                .help("Target chromosome; segments elsewhere are ignored"),
        )
        .arg(
            Arg::new("min-cm")
                .long("min-cm")
                .num_args(1)
                .default_value("0")
                .value_parser(value_parser!(f64))
                .help("Inclusive centimorgan threshold; weaker segments are ignored"),
        )
        .arg(
            Arg::new("names")
                .long("names")
                .action(ArgAction::SetTrue)
                .conflicts_with("plot")
                .help("List the matches beginning (+) and ending (-) at each locus"),
        )
        .arg(
            Arg::new("plot")
                .long("plot")
                .action(ArgAction::SetTrue)
                .help("Emit the depth step series for a plotting tool"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let chromosome = *args.get_one::<i32>("chromosome").unwrap();
    let min_cm = *args.get_one::<f64>("min-cm").unwrap();
    let show_names = args.get_flag("names");
    let show_plot = args.get_flag("plot");

    eprintln!("reading {}", infile);

    let mut ledger = LocusLedger::new(chromosome, min_cm);

    // First record is the export's header; later rows with an unexpected
    // field count are skipped inside Segment::from_record
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(segpile::reader(infile));
    for result in csv_reader.records() {
        let record = result?;
        if let Some(segment) = Segment::from_record(&record)? {
            ledger.register(&segment);
        }
    }

    ledger.aggregate();

    let mut writer = segpile::writer(args.get_one::<String>("outfile").unwrap());

    if show_plot {
        let Some(series) = ledger.step_series() else {
            anyhow::bail!(
                "no data: fewer than two boundary loci on chromosome {}",
                chromosome
            );
        };

        writer.write_fmt(format_args!(
            "# chromosome {}, average depth {}\n",
            ledger.chromosome(),
            series.average as i64
        ))?;
        writer.write_fmt(format_args!("# locus.Mb\tmatches\n"))?;
        for (x, y) in &series.points {
            writer.write_fmt(format_args!("{}\t{}\n", x, y))?;
        }
    } else {
        for (locus, event) in ledger.iter() {
            writer.write_fmt(format_args!(
                "{};{};{}\n",
                ledger.chromosome(),
                locus,
                event.cumulative_overlap
            ))?;
            if show_names {
                if !event.begin_identities.is_empty() {
                    writer.write_fmt(format_args!(
                        "  + {}\n",
                        event.begin_identities.iter().join(", ")
                    ))?;
                }
                if !event.end_identities.is_empty() {
                    writer.write_fmt(format_args!(
                        "  - {}\n",
                        event.end_identities.iter().join(", ")
                    ))?;
                }
            }
        }
    }

    Ok(())
}
