/*!
  Table-form program listings for diagnostics: each row shows an
  instruction's slot address, its raw slots, and its assembly text. Purely
  a presentation concern; the encoding itself lives with the instructions.
*/

use prettytable::{format as TableFormat, Table};

use crate::error::EncodingError;
use crate::instruction::Instruction;

lazy_static! {
  // Open column layout, a plain rule under the titles and nothing else.
  // Listings end up in logs and bug reports, where box drawing gets mangled.
  static ref LISTING_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator(' ')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('-', ' ', ' ', ' ')
      )
      .padding(0, 2)
      .build();
}

/**
  Renders a program as a listing table. Addresses count slots, not
  instructions, so everything after a double word load sits two slots
  further along, exactly as a loader or verifier log would report it.
*/
pub fn listing(program: &[Instruction]) -> Result<Table, EncodingError> {
  let mut table = Table::new();

  table.set_format(*LISTING_FORMAT);
  table.set_titles(row![ubr->"Address", ubl->"Bytes", ubl->"Instruction"]);

  let mut address = 0;
  for instruction in program {
    let raw = instruction.encode()?;
    table.add_row(row![
      r->format!("{}:", address),
      format!("{}", raw),
      format!("{}", instruction)
    ]);
    address += instruction.slots();
  }

  Ok(table)
}
