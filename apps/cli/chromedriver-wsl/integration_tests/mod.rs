mod binary;
mod helpers;
mod startup;
