
mod track;
