//! Packaging shorthand: `<jar>g:a:v</jar>` at the root becomes the project's
//! own coordinate and packaging.

use pomx_xml::{Document, Position};

use crate::error::{Error, Result};
use crate::passes::{add_coordinate, coordinate_of};
use crate::vocabulary::PACKAGINGS;

pub(crate) fn expand_gav(doc: &mut Document) -> Result<()> {
    let query = format!("*[{}]", PACKAGINGS.join("|"));
    let packagings = doc.find(&query)?;
    let shorthand = match packagings.as_slice() {
        [] => return Ok(()),
        [single] => *single,
        _ => {
            let found = packagings
                .iter()
                .filter_map(|&id| doc.name(id).map(str::to_string))
                .collect();
            return Err(Error::MultiplePackagings(found));
        }
    };

    let coordinate = coordinate_of(doc, shorthand)?;
    let packaging = doc.local_name(shorthand).unwrap_or_default().to_string();
    let root = doc.root();
    let here = Position::Before(shorthand);
    add_coordinate(doc, root, &coordinate, here);
    doc.add_text_element(root, "packaging", &packaging, here);
    doc.remove(shorthand);
    Ok(())
}
