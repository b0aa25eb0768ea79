use std::fs;
use std::path::Path;

use ftdc::algebra::parse_listing;
use ftdc::artifact::{ArtifactKind, ArtifactSet};
use ftdc::config::{Config, CONFIG_FILE};
use ftdc::{compile, CompileError, CompileOptions};

const SOURCE: &str = "\
library ieee;
use ieee.std_logic_1164.all;

architecture rtl of ftd is
-- Inputs
signal n_t3_full  : std_logic_vector(2 downto 0);
signal n_t3_short : std_logic_vector(2 downto 0);
signal veto       : std_logic;
-- Outputs
signal ffy : std_logic;
signal zzx : std_logic;
begin
  zzx <= '1' when (n_t3_full>1) and (n_t3_short>0)
                  else '0';
  ffy <= '1' when (n_t3_full=1) and veto='0' else '0';
end rtl;
";

/// Compile `input` the way the command line does and write the artifacts.
fn compile_file(input: &Path) -> Result<Vec<std::path::PathBuf>, CompileError> {
    let config = Config::discover(input.parent().unwrap())?;
    let set = ArtifactSet::for_input(input, &config.prefix, config.out_dir.as_deref())?;
    let source = fs::read_to_string(input).map_err(|e| CompileError::io(input, e))?;
    let options = CompileOptions {
        markers: config.markers,
        function_name: set.function_name.clone(),
    };
    let compiled = compile(&source, "ftd_0.01.vhd", &options)?;
    set.write(&compiled.artifacts)
}

#[test]
fn compiles_source_into_four_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ftd_0.01.vhd");
    fs::write(&input, SOURCE).unwrap();

    let written = compile_file(&input).unwrap();
    assert_eq!(written.len(), 4);

    let inbits = fs::read_to_string(dir.path().join("ftd_0_01.inbits")).unwrap();
    assert_eq!(inbits.lines().count(), 7);
    assert_eq!(inbits.lines().last(), Some("6   veto"));

    let alg = fs::read_to_string(dir.path().join("ftd_0_01.alg")).unwrap();
    assert_eq!(
        alg,
        "0 : ( 0 * !1 * !2 * !6 )\n1 : ( 1 * 3 + 2 * 4 + 1 * 5 + 2 * 3 + 1 * 4 + 2 * 5 )\n"
    );

    let evaluator = fs::read_to_string(dir.path().join("ftd_0_01.rs")).unwrap();
    assert!(evaluator.contains("pub fn ftd_0_01(ftdout: &mut [bool], input: &[bool]) {"));
}

#[test]
fn recompiling_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ftd_0.01.vhd");
    fs::write(&input, SOURCE).unwrap();

    compile_file(&input).unwrap();
    let first: Vec<String> = ArtifactKind::ALL
        .iter()
        .map(|&k| fs::read_to_string(dir.path().join(format!("ftd_0_01.{}", k.extension()))).unwrap())
        .collect();

    compile_file(&input).unwrap();
    let second: Vec<String> = ArtifactKind::ALL
        .iter()
        .map(|&k| fs::read_to_string(dir.path().join(format!("ftd_0_01.{}", k.extension()))).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn listing_agrees_with_model_evaluation() {
    let compiled = compile(SOURCE, "ftd_0.01.vhd", &CompileOptions::default()).unwrap();
    let lines = parse_listing(&compiled.artifacts.algebra).unwrap();

    // Every 7-bit input pattern.
    for pattern in 0u32..(1 << 7) {
        let input: Vec<bool> = (0..7).map(|b| pattern & (1 << b) != 0).collect();
        let outputs = compiled.model.evaluate(&input);
        for line in &lines {
            assert_eq!(line.evaluate(&input), outputs[line.bit], "pattern {:07b}", pattern);
        }
    }
}

#[test]
fn failed_compilation_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ftd_0.01.vhd");
    fs::write(&input, SOURCE.replace("(n_t3_short>0)", "(n_t3_short<1)")).unwrap();

    let err = compile_file(&input).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedComparator { .. }));

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("ftd_0.01.vhd")]);
}

#[test]
fn config_controls_prefix_and_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        "prefix = \"gdl\"\nout_dir = \"generated\"\n",
    )
    .unwrap();
    let input = dir.path().join("gdl_2_1.vhd");
    fs::write(&input, SOURCE).unwrap();

    compile_file(&input).unwrap();
    let evaluator = fs::read_to_string(dir.path().join("generated").join("gdl_2_1.rs")).unwrap();
    assert!(evaluator.contains("pub fn gdl_2_1("));
}
