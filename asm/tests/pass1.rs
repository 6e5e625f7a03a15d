use pasm::{Assembler, Assembly, Error, Options, Tables, WarningKind};

const SAMPLE: &str = "\
START 200
MOVER AREG,='5'
ADD BREG, ONE
MOVEM AREG, TEMP
ONE DC 1
TEMP DS 1
END
";

fn pass1(src: &str) -> Result<Assembly, Error> {
    Assembler::default().pass1(src)
}

fn pass1_with(src: &str, options: Options) -> Result<Assembly, Error> {
    Assembler::new(Tables::default(), options).pass1(src)
}

fn records(asm: &Assembly) -> Vec<String> {
    asm.records().iter().map(|r| r.to_string()).collect()
}

fn symbols(asm: &Assembly) -> Vec<(&str, u16)> {
    asm.symbols().iter().collect()
}

fn literals(asm: &Assembly) -> Vec<(&str, u16)> {
    asm.literals().iter().collect()
}

#[test]
fn sample_program() {
    let asm = pass1(SAMPLE).unwrap();
    assert_eq!(
        records(&asm),
        vec![
            "(AD,01) (C,200)",
            "200 (IS,04) 1 (L,1)",
            "201 (IS,01) 2 (S,1)",
            "202 (IS,05) 1 (S,2)",
            "203 (DL,02) (C,1)",
            "204 (DL,01) (C,1)",
            "(AD,02)",
        ]
    );
    assert_eq!(symbols(&asm), vec![("ONE", 203), ("TEMP", 204)]);
    assert_eq!(literals(&asm), vec![("='5'", 205)]);
    assert!(asm.warnings().is_empty());
}

#[test]
fn label_resolves_forward_reference() {
    let asm = pass1(
        "START 100\n\
         ADD AREG, NEXT\n\
         NEXT SUB BREG, NEXT\n\
         END",
    )
    .unwrap();
    assert_eq!(symbols(&asm), vec![("NEXT", 101)]);
    assert_eq!(records(&asm)[2], "101 (IS,02) 2 (S,1)");
}

#[test]
fn label_only_line() {
    let asm = pass1("START 10\nHERE\nADD AREG, HERE\nEND").unwrap();
    assert_eq!(symbols(&asm), vec![("HERE", 10)]);
    assert_eq!(records(&asm).len(), 3);
    assert_eq!(asm.warnings().len(), 1);
    assert_eq!(asm.warnings()[0].line, 2);
    assert_eq!(
        asm.warnings()[0].kind,
        WarningKind::BareLabel {
            name: "HERE".to_string()
        }
    );
}

#[test]
fn mistyped_mnemonic_is_reported() {
    let asm = pass1("START 10
STOPP
END").unwrap();
    assert_eq!(symbols(&asm), vec![("STOPP", 10)]);
    assert_eq!(
        asm.warnings()[0].to_string(),
        "`STOPP` is not a mnemonic; taken as a label"
    );
}

#[test]
fn first_plain_definition_wins() {
    let asm = pass1("START 10\nL ADD AREG, L\nL SUB AREG, L\nEND").unwrap();
    assert_eq!(symbols(&asm), vec![("L", 10)]);
    assert_eq!(asm.warnings().len(), 1);
    assert_eq!(asm.warnings()[0].line, 3);
    assert_eq!(
        asm.warnings()[0].kind,
        WarningKind::LabelIgnored {
            name: "L".to_string(),
            kept: 10
        }
    );
}

#[test]
fn declarative_overwrites_label() {
    let asm = pass1("START 10\nX ADD AREG, X\nX DC 5\nEND").unwrap();
    assert_eq!(symbols(&asm), vec![("X", 11)]);
    assert_eq!(
        asm.warnings()[0].kind,
        WarningKind::LabelOverwritten {
            name: "X".to_string(),
            previous: 10
        }
    );
}

#[test]
fn strict_labels() {
    let strict = Options {
        strict_labels: true,
        ..Options::default()
    };
    assert!(matches!(
        pass1_with("START 10\nL ADD AREG, L\nL SUB AREG, L\nEND", strict),
        Err(Error::DuplicateDefinition { line: 3, .. })
    ));
    assert!(matches!(
        pass1_with("START 10\nX DC 1\nX DS 2\nEND", strict),
        Err(Error::DuplicateDefinition { line: 3, .. })
    ));
    // binding a forward reference is not a redefinition
    assert!(pass1_with("START 10\nADD AREG, X\nX DC 1\nEND", strict).is_ok());
}

#[test]
fn duplicate_literals() {
    let src = "START 0\nADD AREG,='1'\nSUB BREG,='1'\nEND";
    let asm = pass1(src).unwrap();
    assert_eq!(literals(&asm), vec![("='1'", 2), ("='1'", 3)]);
    assert_eq!(records(&asm)[2], "1 (IS,02) 2 (L,2)");

    let merged = Options {
        merge_literals: true,
        ..Options::default()
    };
    let asm = pass1_with(src, merged).unwrap();
    assert_eq!(literals(&asm), vec![("='1'", 2)]);
    assert_eq!(records(&asm)[2], "1 (IS,02) 2 (L,1)");
}

#[test]
fn storage_and_constants() {
    let asm = pass1("START 0x10\nBUF DS 0x4\nK DC '7'\nN DC -2\nEND").unwrap();
    assert_eq!(symbols(&asm), vec![("BUF", 16), ("K", 20), ("N", 21)]);
    assert_eq!(
        records(&asm)[1..4],
        ["16 (DL,01) (C,4)", "20 (DL,02) (C,7)", "21 (DL,02) (C,-2)"]
    );
}

#[test]
fn unlabelled_storage_binds_nothing() {
    let asm = pass1("START 0\nDS 3\nADD AREG\nEND").unwrap();
    assert!(symbols(&asm).is_empty());
    assert_eq!(records(&asm)[2], "3 (IS,01) 1");
}

#[test]
fn start_without_operand() {
    let asm = pass1("START\nADD AREG\nEND").unwrap();
    assert_eq!(records(&asm)[..2], ["(AD,01) (C,0)", "0 (IS,01) 1"]);
}

#[test]
fn ltorg_is_recorded_only() {
    let asm = pass1("START 50\nADD AREG,='2'\nLTORG\nSUB AREG,='3'\nEND").unwrap();
    assert_eq!(records(&asm)[2], "(AD,03)");
    assert_eq!(literals(&asm), vec![("='2'", 52), ("='3'", 53)]);
}

#[test]
fn comments_and_blank_lines() {
    let asm = pass1("; header\n\nSTART 5 ; origin\n   \nADD AREG, X ; use\nX DC 1\nEND\n").unwrap();
    assert_eq!(symbols(&asm), vec![("X", 6)]);
}

#[test]
fn statements_after_end() {
    let asm = pass1("START 0\nEND\nADD AREG, LATE\n").unwrap();
    assert!(symbols(&asm).is_empty());
    assert_eq!(asm.warnings()[0].line, 3);
    assert_eq!(asm.warnings()[0].kind, WarningKind::AfterEnd);
}

// ----------------------------------------------------------------------------
// Errors

macro_rules! fails {
    ($name:ident, $src:expr, $pat:pat) => {
        #[test]
        fn $name() {
            let result = pass1($src);
            assert!(matches!(result, Err($pat)), "{:?}", result);
        }
    };
}

fails!(unknown_mnemonic, "START 0\nLOOP JUMP AREG\nEND", Error::UnknownMnemonic { line: 2, .. });
fails!(start_not_numeric, "START TWO\nEND", Error::NumericParse { line: 1, .. });
fails!(ds_not_numeric, "START 0\nX DS many\nEND", Error::NumericParse { line: 2, .. });
fails!(dc_not_numeric, "START 0\n\nX DC 'a'\nEND", Error::NumericParse { line: 3, .. });
fails!(dc_without_value, "START 0\nX DC\nEND", Error::MissingOperand { line: 2, .. });
fails!(undefined_symbol, "START 0\nADD AREG, NOWHERE\nEND", Error::UndefinedSymbol { line: 2, .. });
fails!(missing_end, "START 0\nADD AREG, X\nX DC 1\n", Error::MissingEnd);
fails!(cursor_overflow, "START 65534\nX DS 5\nEND", Error::AddressOverflow { line: 2 });

#[test]
fn undefined_symbol_names_the_symbol() {
    match pass1("START 0\nADD AREG, A\nA DC 1\nSUB AREG, GHOST\nEND") {
        Err(Error::UndefinedSymbol { line, name }) => {
            assert_eq!(line, 4);
            assert_eq!(name, "GHOST");
        }
        other => panic!("unexpected: {:?}", other),
    }
}
