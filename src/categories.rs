// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::MacroGroup;
use std::collections::HashMap;

const STANDARD_TABLE: &[(&str, MacroGroup)] = &[
    ("Remuneração", MacroGroup::Income),
    ("Cashback", MacroGroup::Income),
    ("Rendimento", MacroGroup::Income),
    ("Adicional", MacroGroup::Income),
    ("Moradia", MacroGroup::Essential),
    ("Contas residenciais", MacroGroup::Essential),
    ("Supermercado", MacroGroup::Essential),
    ("Transporte", MacroGroup::Essential),
    ("TV / Internet / Telefone", MacroGroup::Essential),
    ("Pets", MacroGroup::Essential),
    ("Filhos", MacroGroup::Essential),
    ("Medicamentos", MacroGroup::Essential),
    ("Plano de saúde", MacroGroup::Essential),
    ("Nutrição e atividade física", MacroGroup::Essential),
    ("Cuidados médicos ou psicológicos", MacroGroup::Essential),
    ("Trabalho", MacroGroup::Essential),
    ("Educação", MacroGroup::Essential),
    ("Previdência", MacroGroup::Essential),
    ("Reforma", MacroGroup::NonEssential),
    ("Bares / Restaurantes / Delivery", MacroGroup::NonEssential),
    ("Móveis e eletrodomésticos", MacroGroup::NonEssential),
    ("Decoração e jardinagem", MacroGroup::NonEssential),
    ("Eletrônicos", MacroGroup::NonEssential),
    ("Vestuário", MacroGroup::NonEssential),
    ("Estética", MacroGroup::NonEssential),
    ("Lazer", MacroGroup::NonEssential),
    ("Presentes", MacroGroup::NonEssential),
    ("Doações", MacroGroup::NonEssential),
    ("Viagens", MacroGroup::NonEssential),
    ("Imóveis", MacroGroup::Investments),
    ("Renda fixa", MacroGroup::Investments),
    ("Imposto de renda", MacroGroup::TaxesAndFees),
    ("Impostos municipais", MacroGroup::TaxesAndFees),
    ("Taxas bancárias", MacroGroup::TaxesAndFees),
];

/// Fine category -> macro-group lookup. Coverage is partial; anything not in
/// the table is `Other`.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    table: HashMap<String, MacroGroup>,
}

impl CategoryMap {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, MacroGroup)>,
        S: Into<String>,
    {
        Self {
            table: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The built-in table used by the ledger's category labels.
    pub fn standard() -> Self {
        Self::new(STANDARD_TABLE.iter().copied())
    }

    pub fn classify(&self, category: &str) -> MacroGroup {
        self.table
            .get(category)
            .copied()
            .unwrap_or(MacroGroup::Other)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Categories mapped to `group`, sorted by name.
    pub fn categories_in(&self, group: MacroGroup) -> Vec<&str> {
        let mut v: Vec<&str> = self
            .table
            .iter()
            .filter(|(_, g)| **g == group)
            .map(|(k, _)| k.as_str())
            .collect();
        v.sort_unstable();
        v
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::standard()
    }
}
