use pasm::{
    listing, print_listing, print_tables, AsmConfig, Assembler, Assembly, Error, Intermediate,
    MnemonicTable, Msg, ResolvedLiterals, ResolvedSymbols, Result, WarningKind,
};
use std::path::Path;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Source file (intermediate code with --pass2)
    #[clap(default_value = "input.txt")]
    input: String,

    /// Mnemonic table definition (NAME CLASS OPCODE LENGTH per line)
    #[clap(short, long)]
    mot: Option<String>,

    /// YAML config
    #[clap(short, long)]
    config: Option<String>,

    /// Directory for output_pass1.txt, symtab.txt, littab.txt, output_pass2.txt
    #[clap(short, long)]
    out_dir: Option<String>,

    /// Label redefinition is an error
    #[clap(long)]
    strict: bool,

    /// Share one literal table entry between identical literals
    #[clap(long)]
    merge_literals: bool,

    /// Only run Pass-2 on an intermediate code file
    #[clap(long, requires = "symtab")]
    pass2: bool,

    /// Symbol table dump for --pass2
    #[clap(long)]
    symtab: Option<String>,

    /// Literal table dump for --pass2
    #[clap(long)]
    littab: Option<String>,

    /// Print tables and listing
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Two-Pass Assembler");

    let src = match read(&args.input) {
        Ok(src) => src,
        Err(err) => {
            err.print_diag(&args.input, &[]);
            return ExitCode::FAILURE;
        }
    };
    let lines: Vec<&str> = src.lines().collect();

    let result = if args.pass2 {
        resolve_only(&args, &src)
    } else {
        assemble(&args, &src, &lines)
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.print_diag(&args.input, &lines);
            ExitCode::FAILURE
        }
    }
}

fn assemble(args: &Args, src: &str, lines: &[&str]) -> Result<()> {
    println!("1. Load Tables");
    let mut config = match &args.config {
        Some(path) => {
            println!("  < {}", path);
            AsmConfig::load(path)?
        }
        None => AsmConfig::default(),
    };
    config.options.strict_labels |= args.strict;
    config.options.merge_literals |= args.merge_literals;

    let mut tables = config.tables()?;
    if let Some(path) = &args.mot {
        println!("  < {}", path);
        tables.mot = MnemonicTable::parse(&read(path)?)?;
    }
    println!(
        "  {} mnemonics, {} registers",
        tables.mot.len(),
        tables.registers.len()
    );

    println!("2. Pass 1");
    println!("  < {}", args.input);
    let assembler = Assembler::new(tables, config.options);
    let assembly = assembler.pass1(src)?;
    for warning in assembly.warnings() {
        Msg::from(warning).diag(&args.input, warning.line, lines);
        if let WarningKind::LabelIgnored { .. } = warning.kind {
            Msg::note("The first definition is kept. Pass --strict to reject redefinitions.")
                .headline();
        }
    }

    println!("3. Pass 2");
    let objects = assembly.pass2()?;

    if args.dump {
        print_tables(&assembly);
        println!("=== OBJECT CODE ===");
        print_listing(assembly.records(), &objects);
    }

    if let Some(dir) = &args.out_dir {
        write(dir, "output_pass1.txt", &assembly.records().to_string())?;
        write(dir, "symtab.txt", &assembly.symbols().to_string())?;
        write(dir, "littab.txt", &assembly.literals().to_string())?;
        write(dir, "output_pass2.txt", &listing(assembly.records(), &objects))?;
    }
    Ok(())
}

fn resolve_only(args: &Args, src: &str) -> Result<()> {
    println!("1. Read Intermediate Code and Tables");
    let records: Intermediate = src.parse()?;
    let symbols = match &args.symtab {
        Some(path) => {
            println!("  < {}", path);
            ResolvedSymbols::parse_dump(&read(path)?)?
        }
        None => ResolvedSymbols::default(),
    };
    let literals = match &args.littab {
        Some(path) => {
            println!("  < {}", path);
            ResolvedLiterals::parse_dump(&read(path)?)?
        }
        None => ResolvedLiterals::default(),
    };

    println!("2. Pass 2");
    let assembly = Assembly::from_parts(records, symbols, literals);
    let objects = assembly.pass2()?;
    print_listing(assembly.records(), &objects);

    if let Some(dir) = &args.out_dir {
        write(dir, "output_pass2.txt", &listing(assembly.records(), &objects))?;
    }
    Ok(())
}

fn read(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.to_string(), e))
}

fn write(dir: &str, name: &str, contents: &str) -> Result<()> {
    let path = Path::new(dir).join(name);
    println!("  > {}", path.display());
    std::fs::write(&path, contents)
        .map_err(|e| Error::FileCreate(path.display().to_string(), e))
}
