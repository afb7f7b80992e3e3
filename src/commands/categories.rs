// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryMap;
use crate::models::MacroGroup;
use crate::utils::pretty_table;
use anyhow::{anyhow, Result};

pub fn handle(categories: &CategoryMap, m: &clap::ArgMatches) -> Result<()> {
    let groups: Vec<MacroGroup> = match m.get_one::<String>("group") {
        Some(raw) => vec![MacroGroup::parse_arg(raw)
            .ok_or_else(|| anyhow!("Unknown group '{}'", raw.trim()))?],
        None => MacroGroup::ALL.to_vec(),
    };
    let mut data = Vec::new();
    for g in groups {
        for c in categories.categories_in(g) {
            data.push(vec![g.to_string(), c.to_string()]);
        }
    }
    println!("{}", pretty_table(&["Group", "Category"], data));
    println!("Categories not listed fall under {}.", MacroGroup::Other);
    Ok(())
}
