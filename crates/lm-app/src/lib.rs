/// Point d'entrée applicatif : ligne de commande et shell interactif.

pub mod cli;
pub mod shell;
