#[cfg(test)]
mod reporting;
#[cfg(test)]
mod submission;
#[cfg(test)]
mod utils;
