/// Show packages in tables
use srcinfo::types::{PackageInfo, PackageReference};

use anyhow::Result;
use console::style;
use std::io::Write;
use tabled::{Alignment, Column, Full, Modify, Style, Table, Tabled};

#[derive(Tabled)]
struct PackageRow {
    #[header("Name")]
    name: String,
    #[header("Version")]
    version: String,
    #[header("Base")]
    base: String,
    #[header("Votes")]
    votes: String,
    #[header("Description")]
    description: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[header("Field")]
    field: String,
    #[header("Value")]
    value: String,
}

fn join_refs(refs: &[PackageReference]) -> String {
    refs.iter()
        .map(|r| match &r.description {
            Some(desc) => format!("{}: {}", r, desc),
            None => r.to_string(),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn show_packages(pkgs: &[PackageInfo]) -> Result<()> {
    if pkgs.is_empty() {
        return Ok(());
    }

    let rows: Vec<PackageRow> = pkgs
        .iter()
        .map(|pkg| {
            let base = if pkg.base_count > 1 {
                format!("{} ({}/{})", pkg.base, pkg.base_index + 1, pkg.base_count)
            } else {
                pkg.base.clone()
            };
            PackageRow {
                name: style(&pkg.name).green().to_string(),
                version: pkg.version.clone(),
                base,
                votes: pkg.votes.to_string(),
                description: pkg.description.clone().unwrap_or_default(),
            }
        })
        .collect();

    let table = Table::new(&rows)
        .with(Modify::new(Full).with(Alignment::left()))
        // Votes column should align right
        .with(Modify::new(Column(3..4)).with(Alignment::right()))
        .with(Modify::new(Full).with(|s: &str| format!(" {} ", s)))
        .with(Style::psql());

    let mut out = std::io::stdout();
    writeln!(out, "{}", table)?;
    Ok(())
}

pub fn show_package(pkg: &PackageInfo) -> Result<()> {
    let mut rows = vec![
        ("Name", style(&pkg.name).bold().to_string()),
        ("Version", pkg.version.clone()),
        ("Base", pkg.base.clone()),
        ("Repository", pkg.repo.clone()),
        ("Description", pkg.description.clone().unwrap_or_default()),
        ("URL", pkg.url.clone().unwrap_or_default()),
        ("Architectures", pkg.archs.join(" ")),
        ("Licenses", pkg.licenses.join(" ")),
        ("Groups", pkg.groups.join(" ")),
        ("Depends", join_refs(&pkg.depends)),
        ("Make Depends", join_refs(&pkg.make_depends)),
        ("Check Depends", join_refs(&pkg.check_depends)),
        ("Optional", join_refs(&pkg.optional)),
        ("Provides", join_refs(&pkg.provides)),
        ("Conflicts", join_refs(&pkg.conflicts)),
        ("Replaces", join_refs(&pkg.replaces)),
        ("PGP Keys", pkg.pgp_keys.join("\n")),
    ];
    if let Some(maintainer) = &pkg.maintainer {
        rows.push(("Maintainer", maintainer.clone()));
    }
    if pkg.votes > 0 || pkg.popularity > 0.0 {
        rows.push(("Votes", pkg.votes.to_string()));
        rows.push(("Popularity", format!("{:.2}", pkg.popularity)));
    }
    if let Some(url) = &pkg.git_url {
        let mut location = url.clone();
        if let Some(branch) = &pkg.git_branch {
            location.push_str(&format!(" ({})", branch));
        }
        if let Some(path) = pkg.git_path.as_ref().filter(|p| !p.is_empty()) {
            location.push_str(&format!("\n{}", path));
        }
        rows.push(("Recipe", location));
    }

    let rows: Vec<FieldRow> = rows
        .into_iter()
        // Don't bother showing empty fields
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| FieldRow {
            field: style(field).bold().to_string(),
            value,
        })
        .collect();

    let table = Table::new(&rows)
        .with(Modify::new(Full).with(Alignment::left()))
        .with(Modify::new(Full).with(|s: &str| format!(" {} ", s)))
        .with(Style::psql());

    let mut out = std::io::stdout();
    writeln!(out, "{}", table)?;
    Ok(())
}
