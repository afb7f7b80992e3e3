// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            settings::set(conn, key, value)?;
            println!("Set {}", key.trim());
        }
        Some(("list", _)) | None => {
            let data = settings::list(conn)?
                .into_iter()
                .map(|(k, v, help)| vec![k, v, help])
                .collect();
            println!("{}", pretty_table(&["Key", "Value", "Meaning"], data));
        }
        _ => {}
    }
    Ok(())
}
