mod probe;
mod search;
mod weather;
