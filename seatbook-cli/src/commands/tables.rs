//! `add-table` and `tables` commands.

use super::FormatArgs;
use crate::error::CliError;
use crate::output::write_tables;
use crate::utils::{lenient_integer, open_engine, print_dry_run, GlobalOptions};
use clap::Args;
use seatbook::{CreateTablePlan, SystemClock, TablePayload};

/// Add a free table.
#[derive(Args)]
pub struct AddTableCommand {
    /// Table name (at least two characters)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Number of seats
    #[arg(long, value_name = "SEATS")]
    pub capacity: Option<String>,

    /// Validate and show the plan without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl AddTableCommand {
    fn payload(&self) -> Option<TablePayload> {
        if self.name.is_none() && self.capacity.is_none() {
            return None;
        }
        Some(TablePayload {
            table_name: self.name.clone(),
            capacity: lenient_integer(self.capacity.as_deref()),
        })
    }

    /// Execute the add-table command. Prints the new table id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let payload = self.payload();

        if self.dry_run {
            let plan = CreateTablePlan::new(payload).build_plan(&SystemClock)?;
            print_dry_run(&plan, global.quiet);
            return Ok(());
        }

        let (mut engine, _config) = open_engine(global)?;
        let table = engine.create_table(payload)?;
        println!("{}", table.id());
        Ok(())
    }
}

/// List every table by name, with the reservation seated at it.
#[derive(Args)]
pub struct TablesCommand {
    #[command(flatten)]
    pub format: FormatArgs,
}

impl TablesCommand {
    /// Execute the tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (engine, config) = open_engine(global)?;
        let tables = engine.list_tables()?;
        write_tables(
            &mut std::io::stdout().lock(),
            self.format.resolve(&config),
            &tables,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: Option<&str>, capacity: Option<&str>) -> AddTableCommand {
        AddTableCommand {
            name: name.map(str::to_string),
            capacity: capacity.map(str::to_string),
            dry_run: false,
        }
    }

    #[test]
    fn test_payload() {
        assert!(command(None, None).payload().is_none());
        let payload = command(Some("Patio"), Some("x")).payload().unwrap();
        assert_eq!(payload.table_name.as_deref(), Some("Patio"));
        assert_eq!(payload.capacity, None);
    }
}
