use std::fmt;

use crate::ast::*;

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Yearly => write!(f, "y"),
            Rule::EveryNDays { days } => write!(f, "d {days}"),
            Rule::Weekly { days } => {
                write!(f, "w ")?;
                write_list(f, days.iter().map(|wd| wd.to_monday_one_offset()))
            }
            Rule::Monthly { days, months } => {
                write!(f, "m ")?;
                write_list(f, days.iter().map(DaySelector::number))?;
                // All months is the default; leave the parameter off.
                if !months.is_all() {
                    write!(f, " ")?;
                    write_list(f, months.iter())?;
                }
                Ok(())
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = i8>) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
