mod resolve;
mod sprints;
mod tasks;
mod translate;
