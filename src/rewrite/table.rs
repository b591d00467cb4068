use crate::sql::{EditList, ObjectName};

use super::options::RewriteOptions;

/// Returns `` `db`.`tab` `` or, with an empty database, `` `tab` ``.
pub(crate) fn qualified_table(options: &RewriteOptions) -> String {
    if options.database.is_empty() {
        quote(&options.table)
    } else {
        format!("{}.{}", quote(&options.database), quote(&options.table))
    }
}

fn quote(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Replaces a table name, in whatever form it was written, with the target.
pub(crate) fn rewrite_table(name: &ObjectName, options: &RewriteOptions, edits: &mut EditList) {
    edits.replace(name.span, qualified_table(options));
}
