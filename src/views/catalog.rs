//! Fixed-schema pages for the console's built-in entities.

use crate::views::browser::Column;
use crate::views::form::{FieldSpec, FormSchema};

/// Columns and form for a built-in entity, if `path` names one.
pub fn custom_layout(path: &str) -> Option<(Vec<Column>, FormSchema)> {
    let layout = match path {
        "staff-details" => (
            vec![
                Column::new("sname", "Name"),
                Column::new("sright", "Status"),
                Column::new("Dressfine", "Dressfine"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::text("sname", "Name"),
                FieldSpec::password("spassword", "Password"),
                FieldSpec::text("sright", "Role").with_placeholder("admin, account, Manager"),
                FieldSpec::number("Dressfine", "Dressfine"),
            ]),
        ),
        "login-tracker" => (
            vec![
                Column::new("UserName", "User"),
                Column::new("LoginoutDate", "Date"),
                Column::new("LoginTime", "Login"),
                Column::new("Remarks", "Remarks"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::text("UserName", "User"),
                FieldSpec::text("LoginoutDate", "Date"),
                FieldSpec::text("Remarks", "Remarks"),
            ]),
        ),
        "attendance" => (
            vec![
                Column::new("empid", "Emp ID"),
                Column::new("Attdate", "Att Date"),
                Column::new("Nepdate", "Nep Date"),
                Column::new("presentation", "Present"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::number("empid", "Emp ID"),
                FieldSpec::text("Attdate", "Att Date"),
                FieldSpec::text("Nepdate", "Nep Date"),
                FieldSpec::text("presentation", "Present"),
            ]),
        ),
        "ver-files" => (
            vec![
                Column::new("parti", "Parti"),
                Column::new("year", "Year"),
                Column::new("Transaction", "Transaction"),
                Column::new("taxpayable", "Tax Payable"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::text("parti", "Parti"),
                FieldSpec::text("year", "Year"),
                FieldSpec::number("Transaction", "Transaction"),
                FieldSpec::number("taxpayable", "Tax Payable"),
            ]),
        ),
        "ranking" => (
            vec![
                Column::new("PanNo", "Pan No"),
                Column::new("Fiscalyear", "Fiscal Year"),
                Column::new("ttlsale", "Total Sale"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::text("PanNo", "Pan No"),
                FieldSpec::text("Fiscalyear", "Fiscal Year"),
                FieldSpec::number("ttlsale", "Total Sale"),
            ]),
        ),
        "vat-stmt" => (
            vec![
                Column::new("Fiscalyear", "Fiscal Year"),
                Column::new("Months", "Months"),
                Column::new("Parti", "Parti"),
                Column::new("Payable", "Payable"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::text("Fiscalyear", "Fiscal Year"),
                FieldSpec::text("Months", "Months"),
                FieldSpec::text("Parti", "Parti"),
                FieldSpec::number("Payable", "Payable"),
            ]),
        ),
        // The list omits contact and VAT credentials, so edits reload the full record.
        "parti" => (
            vec![
                Column::new("PanNo", "Pan No"),
                Column::new("Parti", "Parti"),
                Column::new("Address", "Address"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed_refetch(vec![
                FieldSpec::text("PanNo", "Pan No"),
                FieldSpec::text("Parti", "Parti"),
                FieldSpec::text("Address", "Address"),
                FieldSpec::text("Email", "Email"),
                FieldSpec::text("Contact_No", "Contact No"),
                FieldSpec::text("FP", "FP"),
                FieldSpec::text("UserVat", "User VAT"),
                FieldSpec::password("PassVat", "VAT Password"),
                FieldSpec::text("Mtax", "Mtax"),
            ]),
        ),
        "daily-works" => (
            vec![
                Column::new("PanNo", "Pan No"),
                Column::new("PartiName", "Parti Name"),
                Column::new("User", "User"),
                Column::new("worktype", "Type"),
                Column::new("work", "Work"),
                Column::new("created_at", "Created"),
            ],
            FormSchema::fixed(vec![
                FieldSpec::text("PanNo", "Pan No"),
                FieldSpec::text("PartiName", "Parti Name"),
                FieldSpec::text("User", "User"),
                FieldSpec::text("worktype", "Type"),
                FieldSpec::text("work", "Work"),
                FieldSpec::text("Remarks", "Remarks"),
            ]),
        ),
        _ => return None,
    };
    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_custom_entities;

    #[test]
    fn every_builtin_entity_has_a_layout() {
        for entity in default_custom_entities() {
            let (columns, schema) = custom_layout(&entity.path).unwrap();
            assert!(!columns.is_empty(), "{}", entity.path);
            assert!(matches!(schema, FormSchema::Fixed { ref fields, .. } if !fields.is_empty()));
        }
        assert!(custom_layout("clients").is_none());
    }
}
