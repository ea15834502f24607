use std::collections::BTreeMap;
use std::io::{self, Write};

use fibre_forge::{BeadType, Network};

use crate::util::text::{group_digits, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_network_summary(network: &Network) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let domain = &network.domain;
    let boundary = network.count_beads_of_type(&BeadType::Boundary);

    let rows = vec![
        (
            "Domain",
            format!("{:.1} × {:.1}", domain.size_x, domain.size_y),
        ),
        ("Beads", group_digits(network.bead_count())),
        ("Boundary Beads", group_digits(boundary)),
        ("Bonds", group_digits(network.bond_count())),
        ("Angles", group_digits(network.angle_count())),
        (
            "Bond Types",
            format!("{} parameterized", network.bond_type_parameters.len()),
        ),
    ];

    print_kv_table(&mut out, "Network Summary", &rows);
}

pub fn print_bond_types(network: &Network) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for bond in &network.bonds {
        *counts.entry(bond.kind.as_str()).or_insert(0) += 1;
    }

    if counts.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let name_w = 14usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let params_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Bond Types ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{n_line}┬{c_line}┬{p_line}┐",
        INDENT,
        n_line = "─".repeat(name_w + 2),
        c_line = "─".repeat(count_w + 2),
        p_line = "─".repeat(params_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<params_w$} │",
        INDENT,
        "Type",
        "Count",
        "Parameters",
    );
    let _ = writeln!(
        out,
        "{}├{n_line}┼{c_line}┼{p_line}┤",
        INDENT,
        n_line = "─".repeat(name_w + 2),
        c_line = "─".repeat(count_w + 2),
        p_line = "─".repeat(params_w + 2)
    );

    for (name, count) in &counts {
        let params = network
            .bond_type_parameters
            .get(*name)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "untyped".to_string());
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<params_w$} │",
            INDENT,
            truncate(name, name_w),
            group_digits(*count),
            truncate(&params, params_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{n_line}┴{c_line}┴{p_line}┘",
        INDENT,
        n_line = "─".repeat(name_w + 2),
        c_line = "─".repeat(count_w + 2),
        p_line = "─".repeat(params_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value",
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
