use crate::app::input::Console;
use crate::core::registry::FairRegistry;
use crate::core::reports;
use crate::domain::model::{Company, StandSize, Visitor, MAX_RATING, MIN_RATING};
use crate::domain::ports::Clock;
use crate::utils::error::{FairError, Result};
use std::io::{self, BufRead, Write};

const MENU: &str = "
===== Business Fair =====
1) Register company
2) List companies
3) Edit company
4) Delete company
5) Create stand
6) List stands (all/available/occupied)
7) Assign stand to company
8) Unassign stand
9) Register visitor
10) List visitors
11) Edit visitor
12) Delete visitor
13) Add comment to a stand
14) Show comments and average for a stand
15) Report: Companies and Stands
16) Report: Visitors and visited Stands
17) Report: Average rating per Stand
0) Exit";

enum Flow {
    Continue,
    Exit,
}

/// Interactive menu over a registry. Domain errors are printed and the loop
/// continues; only I/O failures end it early.
pub struct Shell<R, W, C: Clock> {
    console: Console<R, W>,
    registry: FairRegistry<C>,
}

impl<R: BufRead, W: Write, C: Clock> Shell<R, W, C> {
    pub fn new(registry: FairRegistry<C>, input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            registry,
        }
    }

    pub fn registry(&self) -> &FairRegistry<C> {
        &self.registry
    }

    /// Hands back the registry and the writer once the session is over.
    pub fn into_parts(self) -> (FairRegistry<C>, W) {
        (self.registry, self.console.into_output())
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.console.out(), "{}", MENU)?;
            let outcome = self
                .console
                .read_line("Choose an option: ")
                .map_err(FairError::from)
                .and_then(|choice| self.dispatch(&choice));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(FairError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("Input closed, leaving shell");
                    break;
                }
                Err(e @ (FairError::Io(_) | FairError::Serialization(_))) => return Err(e),
                Err(e) => {
                    tracing::warn!("{} (category: {:?})", e, e.category());
                    writeln!(self.console.out(), "Error: {}", e)?;
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.register_company()?,
            "2" => self.list_companies()?,
            "3" => self.edit_company()?,
            "4" => self.delete_company()?,
            "5" => self.create_stand()?,
            "6" => self.list_stands()?,
            "7" => self.assign_stand()?,
            "8" => self.unassign_stand()?,
            "9" => self.register_visitor()?,
            "10" => self.list_visitors()?,
            "11" => self.edit_visitor()?,
            "12" => self.delete_visitor()?,
            "13" => self.add_comment()?,
            "14" => self.show_comments()?,
            "15" => {
                let report = reports::companies_and_stands(&self.registry);
                writeln!(self.console.out(), "\n{}", report)?;
            }
            "16" => {
                let report = reports::visitors_and_visits(&self.registry);
                writeln!(self.console.out(), "\n{}", report)?;
            }
            "17" => {
                let report = reports::ratings_by_stand(&self.registry);
                writeln!(self.console.out(), "\n{}", report)?;
            }
            "0" => {
                writeln!(self.console.out(), "Exiting...")?;
                return Ok(Flow::Exit);
            }
            _ => writeln!(self.console.out(), "Invalid option. Use 0-17.")?,
        }
        Ok(Flow::Continue)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.console.out(), "{}", message)?;
        Ok(())
    }

    fn register_company(&mut self) -> Result<()> {
        let name = self.console.read_non_blank("Company name: ")?;
        let sector = self.console.read_non_blank("Sector: ")?;
        let email = self.console.read_non_blank("Email: ")?;
        self.registry
            .register_company(Company::new(&name, &sector, &email)?)?;
        self.say("Company registered.")
    }

    fn list_companies(&mut self) -> Result<()> {
        let companies = self.registry.list_companies();
        let out = self.console.out();
        writeln!(out, "\nCompanies:")?;
        if companies.is_empty() {
            writeln!(out, "(none)")?;
        }
        for company in &companies {
            writeln!(out, "{}", company)?;
        }
        Ok(())
    }

    fn edit_company(&mut self) -> Result<()> {
        let name = self.console.read_non_blank("Company to edit: ")?;
        self.registry.company(&name)?;
        let sector = self
            .console
            .read_optional("New sector (blank keeps current): ")?;
        let email = self
            .console
            .read_optional("New email (blank keeps current): ")?;
        self.registry
            .edit_company(&name, sector.as_deref(), email.as_deref())?;
        self.say("Company updated.")
    }

    fn delete_company(&mut self) -> Result<()> {
        let name = self.console.read_non_blank("Company to delete: ")?;
        self.registry.delete_company(&name)?;
        self.say("Company deleted (its stands were freed).")
    }

    fn create_stand(&mut self) -> Result<()> {
        let number = self.console.read_non_blank("Stand number: ")?;
        let location = self.console.read_non_blank("Location: ")?;
        let size: StandSize = self
            .console
            .read_non_blank("Size (1) SMALL  (2) MEDIUM  (3) LARGE: ")?
            .parse()?;
        self.registry.create_stand(&number, &location, size)?;
        self.say("Stand created.")
    }

    fn list_stands(&mut self) -> Result<()> {
        let sections = [
            ("Stands (all):", self.registry.list_stands()),
            ("Available:", self.registry.list_available_stands()),
            ("Occupied:", self.registry.list_occupied_stands()),
        ];
        let out = self.console.out();
        for (title, stands) in &sections {
            writeln!(out, "\n{}", title)?;
            if stands.is_empty() {
                writeln!(out, "(none)")?;
            }
            for stand in stands {
                writeln!(out, "{}", stand)?;
            }
        }
        Ok(())
    }

    fn assign_stand(&mut self) -> Result<()> {
        let number = self.console.read_non_blank("Stand number: ")?;
        let company = self.console.read_non_blank("Company name: ")?;
        self.registry.assign_stand(&number, &company)?;
        self.say("Stand assigned.")
    }

    fn unassign_stand(&mut self) -> Result<()> {
        let number = self.console.read_non_blank("Stand number: ")?;
        self.registry.unassign_stand(&number)?;
        self.say("Stand unassigned.")
    }

    fn register_visitor(&mut self) -> Result<()> {
        let id = self.console.read_non_blank("Visitor ID: ")?;
        let name = self.console.read_non_blank("Name: ")?;
        let email = self.console.read_non_blank("Email: ")?;
        self.registry
            .register_visitor(Visitor::new(&id, &name, &email)?)?;
        self.say("Visitor registered.")
    }

    fn list_visitors(&mut self) -> Result<()> {
        let visitors = self.registry.list_visitors();
        let out = self.console.out();
        writeln!(out, "\nVisitors:")?;
        if visitors.is_empty() {
            writeln!(out, "(none)")?;
        }
        for visitor in &visitors {
            writeln!(out, "{}", visitor)?;
        }
        Ok(())
    }

    fn edit_visitor(&mut self) -> Result<()> {
        let id = self.console.read_non_blank("Visitor ID to edit: ")?;
        self.registry.visitor(&id)?;
        let name = self
            .console
            .read_optional("New name (blank keeps current): ")?;
        let email = self
            .console
            .read_optional("New email (blank keeps current): ")?;
        self.registry
            .edit_visitor(&id, name.as_deref(), email.as_deref())?;
        self.say("Visitor updated.")
    }

    fn delete_visitor(&mut self) -> Result<()> {
        let id = self.console.read_non_blank("Visitor ID to delete: ")?;
        self.registry.delete_visitor(&id)?;
        self.say("Visitor deleted (and their comments removed).")
    }

    fn add_comment(&mut self) -> Result<()> {
        let id = self.console.read_non_blank("Visitor ID: ")?;
        let stand = self.console.read_non_blank("Stand number: ")?;
        let prompt = format!("Rating ({}..{}): ", MIN_RATING, MAX_RATING);
        let rating = self
            .console
            .read_int_in_range(&prompt, MIN_RATING, MAX_RATING)?;
        let text = self.console.read_non_blank("Comment: ")?;
        self.registry.add_comment(&id, &stand, rating, &text)?;
        self.say("Comment registered.")
    }

    fn show_comments(&mut self) -> Result<()> {
        let number = self.console.read_non_blank("Stand number: ")?;
        let comments = self.registry.list_comments(&number)?;
        let average = self.registry.average_rating(&number)?;

        let mut lines = Vec::with_capacity(comments.len());
        for c in &comments {
            let author = self
                .registry
                .visitor_name(c.visitor_id())
                .unwrap_or_else(|| "(not registered)".to_string());
            lines.push(format!(
                "- [{}] ({}) {} - {} [{}]",
                c.date(),
                c.rating(),
                c.text(),
                author,
                c.visitor_id()
            ));
        }

        let out = self.console.out();
        writeln!(out, "\nComments for stand {}:", number)?;
        if lines.is_empty() {
            writeln!(out, "(no comments)")?;
        }
        for line in &lines {
            writeln!(out, "{}", line)?;
        }
        match average {
            Some(avg) => writeln!(out, "Average: {:.2}", avg)?,
            None => writeln!(out, "No ratings yet.")?,
        }
        Ok(())
    }
}
