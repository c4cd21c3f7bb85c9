use crate::pos::Pos;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Location<'a> {
    pub path: &'a Path,
    pub line: usize,
    pub col: usize,
}

impl<'a> std::fmt::Display for Location<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = std::env::current_dir()
            .ok()
            .and_then(|cwd| self.path.strip_prefix(&cwd).ok())
            .unwrap_or(self.path)
            .to_string_lossy();

        write!(f, "{path}:{}:{}", self.line, self.col)
    }
}

/// Registry of loaded files. Every file occupies its own range of [`Pos`]
/// values, with a one byte gap so the end-of-file position of one file never
/// collides with the start of the next.
#[derive(Default)]
pub struct FileManager {
    file_offset: Vec<usize>,
    file_path: Vec<PathBuf>,
    newlines: Vec<Vec<usize>>,
    last_offset: usize,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub offset: Pos,
    pub text: String,
}

impl FileManager {
    pub fn open(&mut self, path: PathBuf) -> Result<SourceFile, std::io::Error> {
        let text = read_to_string(&path)?;
        Ok(self.add_file(path, text))
    }

    pub fn add_file(&mut self, path: PathBuf, text: String) -> SourceFile {
        let offset = self.last_offset;
        let newlines = text
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();

        self.file_offset.push(offset);
        self.file_path.push(path);
        self.newlines.push(newlines);
        self.last_offset += text.len() + 1;

        SourceFile {
            offset: Pos::from(offset),
            text,
        }
    }

    /// Resolves `pos` into a 1-based line and byte column, or `None` when no
    /// file has been registered at or before it.
    pub fn location(&self, pos: Pos) -> Option<Location> {
        let i = self
            .file_offset
            .partition_point(|x| *x <= pos.offset())
            .checked_sub(1)?;

        let offset = pos.offset() - self.file_offset[i];
        let newlines = &self.newlines[i];
        let line = newlines.partition_point(|x| *x < offset) + 1;
        let col = if line == 1 {
            offset + 1
        } else {
            offset - newlines[line - 2]
        };

        Some(Location {
            path: &self.file_path[i],
            line,
            col,
        })
    }
}
