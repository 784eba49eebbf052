use std::io::{Cursor, Read};
use std::ops::Range;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use lexdfa::{Automaton, SymbolId};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAGIC: &[u8; 4] = b"LDFA";
const VERSION: u16 = 1;

// states = rows, last row is the error state
// symbols = columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaTable {
    data: Vec<u32>,
    accepting: Vec<bool>,
    states: usize,
    inputs: usize,
    initial_state: u32,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("state {state} has an epsilon move or two moves on one symbol")]
    NotDeterministic { state: u32 },
    #[error("state {state} has a transition on symbol {symbol}, outside the alphabet of {inputs}")]
    SymbolOutOfRange { state: u32, symbol: u32, inputs: usize },
    #[error("no token matches at offset {offset}")]
    NoMatch { offset: usize },
    #[error("not a compiled table (bad magic)")]
    BadMagic,
    #[error("unsupported table version {0}")]
    UnsupportedVersion(u16),
    #[error("malformed table: {0}")]
    Malformed(&'static str),
    #[error("{0} trailing bytes after table")]
    TrailingBytes(usize),
    #[error("failed to read table")]
    Io(#[from] std::io::Error),
}

impl DfaTable {
    pub fn from_automaton(dfa: &Automaton) -> Result<DfaTable, TableError> {
        let states = dfa.number_of_states() + 1;
        let inputs = dfa.number_of_symbols() as usize;
        let error_state = (states - 1) as u32;
        let mut data: Vec<u32> = vec![error_state; states * inputs];

        for state in dfa.states() {
            for (label, next) in dfa.transitions(state) {
                let symbol = label.ok_or(TableError::NotDeterministic { state: state.0 })?;
                if symbol.index() >= inputs {
                    return Err(TableError::SymbolOutOfRange {
                        state: state.0,
                        symbol: symbol.0,
                        inputs,
                    });
                }
                let cell = &mut data[state.index() * inputs + symbol.index()];
                if *cell != error_state {
                    return Err(TableError::NotDeterministic { state: state.0 });
                }
                *cell = next.0;
            }
        }

        let mut accepting: Vec<bool> = dfa.states().map(|state| dfa.is_accepting(state)).collect();
        accepting.push(false);

        let initial_state = if dfa.number_of_states() == 0 {
            error_state
        } else {
            dfa.start_state().0
        };

        debug!("built {}x{} transition table", states, inputs);
        Ok(DfaTable {
            data,
            accepting,
            states,
            inputs,
            initial_state,
        })
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn initial_state(&self) -> u32 {
        self.initial_state
    }

    pub fn error_state(&self) -> u32 {
        (self.states - 1) as u32
    }

    // symbols outside the alphabet go to the error state
    pub fn next_state(&self, current_state: u32, symbol: SymbolId) -> u32 {
        if symbol.index() >= self.inputs {
            return self.error_state();
        }
        self.data[current_state as usize * self.inputs + symbol.index()]
    }

    pub fn is_accepting(&self, state: u32) -> bool {
        self.accepting[state as usize]
    }

    pub fn matches(&self, input: &[SymbolId]) -> bool {
        let state = input
            .iter()
            .fold(self.initial_state, |state, &symbol| self.next_state(state, symbol));
        self.is_accepting(state)
    }

    /// Maximal munch: end offset of the longest accepted slice of `input`
    /// starting at `start`, or `None` if no slice (not even the empty one) is
    /// accepted.
    pub fn longest_match(&self, input: &[SymbolId], start: usize) -> Option<usize> {
        let mut state = self.initial_state;
        let mut last_accept = self.is_accepting(state).then_some(start);

        for (offset, &symbol) in input.iter().enumerate().skip(start) {
            state = self.next_state(state, symbol);
            if state == self.error_state() {
                break;
            }
            if self.is_accepting(state) {
                last_accept = Some(offset + 1);
            }
        }
        last_accept
    }

    // split the entire input into longest matches
    pub fn scan(&self, input: &[SymbolId]) -> Result<Vec<Range<usize>>, TableError> {
        let mut tokens = Vec::new();
        let mut cursor = 0;
        while cursor < input.len() {
            match self.longest_match(input, cursor) {
                Some(end) if end > cursor => {
                    tokens.push(cursor..end);
                    cursor = end;
                }
                _ => return Err(TableError::NoMatch { offset: cursor }),
            }
        }
        Ok(tokens)
    }

    pub fn compile_table(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::with_capacity(18 + self.data.len() * 4 + self.accepting.len());
        out.extend_from_slice(MAGIC);
        let mut version = [0u8; 2];
        LittleEndian::write_u16(&mut version, VERSION);
        out.extend_from_slice(&version);
        push_u32(&mut out, self.states as u32);
        push_u32(&mut out, self.inputs as u32);
        push_u32(&mut out, self.initial_state);
        for &next in &self.data {
            push_u32(&mut out, next);
        }
        out.extend(self.accepting.iter().map(|&x| x as u8));
        out
    }

    pub fn load_table(bytes: &[u8]) -> Result<DfaTable, TableError> {
        let mut reader = Cursor::new(bytes);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(TableError::BadMagic);
        }
        let version = reader.read_u16::<LittleEndian>()?;
        if version != VERSION {
            return Err(TableError::UnsupportedVersion(version));
        }

        let states = reader.read_u32::<LittleEndian>()? as usize;
        let inputs = reader.read_u32::<LittleEndian>()? as usize;
        let initial_state = reader.read_u32::<LittleEndian>()?;
        if states == 0 {
            return Err(TableError::Malformed("missing error state"));
        }
        if initial_state as usize >= states {
            return Err(TableError::Malformed("initial state out of range"));
        }
        let cells = states
            .checked_mul(inputs)
            .ok_or(TableError::Malformed("table size overflows"))?;

        // grown as read, the header is not trusted for allocation
        let mut data: Vec<u32> = Vec::new();
        for _ in 0..cells {
            let next = reader.read_u32::<LittleEndian>()?;
            if next as usize >= states {
                return Err(TableError::Malformed("transition target out of range"));
            }
            data.push(next);
        }

        let mut accepting: Vec<bool> = Vec::new();
        for _ in 0..states {
            match reader.read_u8()? {
                0 => accepting.push(false),
                1 => accepting.push(true),
                _ => return Err(TableError::Malformed("accepting flag is not 0 or 1")),
            }
        }

        let error_state = (states - 1) as u32;
        let error_row = &data[(states - 1) * inputs..];
        if accepting[states - 1] || error_row.iter().any(|&next| next != error_state) {
            return Err(TableError::Malformed("error state must be a non-accepting sink"));
        }

        let trailing = bytes.len() - reader.position() as usize;
        if trailing > 0 {
            return Err(TableError::TrailingBytes(trailing));
        }

        Ok(DfaTable {
            data,
            accepting,
            states,
            inputs,
            initial_state,
        })
    }
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    let mut bytes = [0u8; 4];
    LittleEndian::write_u32(&mut bytes, value);
    out.extend_from_slice(&bytes);
}
