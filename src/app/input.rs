use std::io::{self, BufRead, Write};

/// Line-oriented prompting over any reader/writer pair.
///
/// Every read returns `ErrorKind::UnexpectedEof` once the input is exhausted,
/// so callers can unwind with `?` and treat that as a clean exit.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints the prompt and returns the next line, trimmed.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim().to_string())
    }

    /// Blank input is allowed and comes back as `None`.
    pub fn read_optional(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let line = self.read_line(prompt)?;
        Ok((!line.is_empty()).then_some(line))
    }

    pub fn read_non_blank(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let line = self.read_line(prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "Invalid input. It cannot be empty.")?;
        }
    }

    pub fn read_int(&mut self, prompt: &str) -> io::Result<i32> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<i32>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid input. Enter a whole number.")?,
            }
        }
    }

    /// Keeps asking until the value lies in `min..=max`.
    pub fn read_int_in_range(&mut self, prompt: &str, min: i32, max: i32) -> io::Result<i32> {
        loop {
            let value = self.read_int(prompt)?;
            if (min..=max).contains(&value) {
                return Ok(value);
            }
            writeln!(
                self.output,
                "Invalid input. Must be between {} and {}.",
                min, max
            )?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_read_non_blank_retries() {
        let mut c = console("\n   \n Acme \n");
        assert_eq!(c.read_non_blank("Name: ").unwrap(), "Acme");
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("It cannot be empty").count(), 2);
    }

    #[test]
    fn test_read_int_in_range_retries() {
        let mut c = console("abc\n9\n0\n4\n");
        assert_eq!(c.read_int_in_range("Rating: ", 1, 5).unwrap(), 4);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out.matches("whole number").count(), 1);
        assert_eq!(out.matches("between 1 and 5").count(), 2);
    }

    #[test]
    fn test_read_optional_blank_is_none() {
        let mut c = console("\nvalue\n");
        assert_eq!(c.read_optional("Sector: ").unwrap(), None);
        assert_eq!(c.read_optional("Sector: ").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_eof_is_unexpected_eof() {
        let mut c = console("");
        let err = c.read_non_blank("Name: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
